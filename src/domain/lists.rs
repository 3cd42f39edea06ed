/// An ordered column of cards within a board. `position` is the display
/// sort key; values need not be contiguous and are assigned by callers.
#[derive(Debug, Clone)]
pub struct List {
    pub id: i32,
    pub name: String,
    pub board_id: i32,
    pub position: i32,
}
