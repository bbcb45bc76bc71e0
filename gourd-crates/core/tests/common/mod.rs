#![allow(dead_code, reason = "every test target uses a different subset of the helpers")]

use gourd_core::constraints::Automaton;
use gourd_core::domains::IntervalDomain;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Accepts the binary strings without two consecutive ones.
pub(crate) fn no_consecutive_ones() -> Automaton {
    let mut automaton = Automaton::new(2, 0, [0, 1]).expect("valid automaton");
    automaton
        .add_transition(0, 0, IntervalDomain::from_values([0]))
        .expect("valid transition");
    automaton
        .add_transition(0, 1, IntervalDomain::from_values([1]))
        .expect("valid transition");
    automaton
        .add_transition(1, 0, IntervalDomain::from_values([0]))
        .expect("valid transition");
    automaton
}

/// Every word of `length` symbols over `alphabet`.
pub(crate) fn all_words(alphabet: &[i32], length: usize) -> Vec<Vec<i32>> {
    (0..length).fold(vec![vec![]], |words, _| {
        words
            .into_iter()
            .flat_map(|word| {
                alphabet.iter().map(move |&symbol| {
                    let mut extended = word.clone();
                    extended.push(symbol);
                    extended
                })
            })
            .collect()
    })
}
