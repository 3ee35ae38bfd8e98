/// Per-screen view state. Exactly one variant holds at a time and
/// transitions are strictly `Idle -> Loading -> Loaded | Failed`;
/// `Failed` is not sticky, a later action replaces it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
