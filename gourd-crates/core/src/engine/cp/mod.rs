mod assignments;
mod propagator_queue;
#[cfg(test)]
pub(crate) mod test_solver;
mod trailed;
mod watch_list;

pub use assignments::Assignments;
pub(crate) use propagator_queue::PropagatorQueue;
pub use trailed::TrailedInteger;
pub(crate) use trailed::TrailedValues;
pub(crate) use watch_list::WatchList;
pub use watch_list::Watchers;
