use super::TrailedInteger;

/// The value a [`TrailedInteger`] had before it was overwritten.
#[derive(Debug, Clone)]
pub(crate) struct TrailedChange {
    pub(crate) old_value: i64,
    pub(crate) reference: TrailedInteger,
}
