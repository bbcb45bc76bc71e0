use super::TrailedChange;
use super::TrailedInteger;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;

/// Reversible integers which are restored when the solver backtracks.
#[derive(Default, Debug, Clone)]
pub(crate) struct TrailedValues {
    trail: Trail<TrailedChange>,
    values: KeyedVec<TrailedInteger, i64>,
}

impl TrailedValues {
    pub(crate) fn grow(&mut self, initial_value: i64) -> TrailedInteger {
        self.values.push(initial_value)
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint()
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(crate) fn read(&self, trailed_integer: TrailedInteger) -> i64 {
        self.values[trailed_integer]
    }

    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) {
        self.trail
            .synchronise(new_checkpoint)
            .for_each(|state_change| self.values[state_change.reference] = state_change.old_value)
    }

    fn write(&mut self, trailed_integer: TrailedInteger, value: i64) {
        let old_value = self.values[trailed_integer];
        if old_value == value {
            return;
        }

        // Changes at the root are never undone.
        if self.trail.get_checkpoint() > 0 {
            self.trail.push(TrailedChange {
                old_value,
                reference: trailed_integer,
            });
        }
        self.values[trailed_integer] = value;
    }

    pub(crate) fn add_assign(&mut self, trailed_integer: TrailedInteger, addition: i64) {
        self.write(trailed_integer, self.values[trailed_integer] + addition);
    }

    pub(crate) fn assign(&mut self, trailed_integer: TrailedInteger, value: i64) {
        self.write(trailed_integer, value);
    }
}

#[cfg(test)]
mod tests {
    use super::TrailedValues;

    #[test]
    fn synchronise_restores_values_per_checkpoint() {
        let mut values = TrailedValues::default();
        let trailed_integer = values.grow(0);

        assert_eq!(values.read(trailed_integer), 0);

        values.new_checkpoint();
        values.add_assign(trailed_integer, 5);

        assert_eq!(values.read(trailed_integer), 5);

        values.add_assign(trailed_integer, 5);
        assert_eq!(values.read(trailed_integer), 10);

        values.new_checkpoint();
        values.assign(trailed_integer, 11);

        assert_eq!(values.read(trailed_integer), 11);

        values.synchronise(1);
        assert_eq!(values.read(trailed_integer), 10);

        values.synchronise(0);
        assert_eq!(values.read(trailed_integer), 0);
    }

    #[test]
    fn root_changes_are_permanent() {
        let mut values = TrailedValues::default();
        let trailed_integer = values.grow(3);

        values.assign(trailed_integer, 7);
        values.new_checkpoint();
        values.synchronise(0);

        assert_eq!(values.read(trailed_integer), 7);
    }
}
