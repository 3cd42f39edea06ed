#[derive(Debug, Clone)]
pub struct Card {
    pub id: i32,
    pub name: String,
    pub list_id: i32,
    pub position: i32,
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub description: Option<String>,
}
