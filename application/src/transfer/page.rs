#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDto<T> {
    pub data: Vec<T>,
    pub total_pages: i64,
    pub current_page: i64,
}
