use std::fmt;

/// An opaque item read from a store, identified by a string.
pub trait Record: Send + fmt::Debug + 'static {
    fn id(&self) -> &str;
}

/// Forward-only paging position, the number of records already fetched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position(u64);

impl Position {
    pub const START: Position = Position(0);

    #[inline]
    pub fn offset(&self) -> u64 {
        self.0
    }

    #[inline]
    pub fn advance(self, n: usize) -> Self {
        Position(self.0 + n as u64)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// One batch of records returned by a single fetch.
pub struct Page<T> {
    items: Vec<T>,
    end_of_data: bool,
}

impl<T> Page<T> {
    /// Build a page from a fetch of `fetch_size`.
    ///
    /// The page ends the data when it is short, or when the store knows
    /// the total was reached.
    pub fn from_fetch(items: Vec<T>, fetch_size: usize, total_reached: bool) -> Self {
        let end_of_data = total_reached || items.len() < fetch_size;
        Self { items, end_of_data }
    }

    pub fn new(items: Vec<T>, end_of_data: bool) -> Self {
        Self { items, end_of_data }
    }

    #[inline]
    pub fn last(items: Vec<T>) -> Self {
        Self { items, end_of_data: true }
    }

    #[inline]
    pub fn empty_last() -> Self {
        Self { items: Vec::new(), end_of_data: true }
    }

    #[inline]
    pub fn end_of_data(&self) -> bool {
        self.end_of_data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

impl<T> fmt::Debug for Page<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "page(len={}, end_of_data={})", self.items.len(), self.end_of_data)
    }
}
