use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct SelectLimit(i64);

impl SelectLimit {
    pub fn new(value: impl Into<i64>) -> Self {
        SelectLimit(value.into())
    }
}

impl Default for SelectLimit {
    fn default() -> Self {
        Self::new(10)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct SelectOffset(i64);

impl SelectOffset {
    pub fn new(value: impl Into<i64>) -> Self {
        SelectOffset(value.into())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn apply(&self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}
