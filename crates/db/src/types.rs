/// One calendar item joined with its calendar, as stored.
///
/// `start_date` and `end_date` are seconds since 2001-01-01T00:00:00Z.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreItem {
    pub calendar: Option<String>,
    pub summary: Option<String>,
    pub start_date: Option<f64>,
    pub end_date: Option<f64>,
}
