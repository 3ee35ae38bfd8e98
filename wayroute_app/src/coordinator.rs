use tokio::sync::watch;
use wayroute_core::LocationPair;

/// Screens of the navigation flow. `RouteView` carries the resolved
/// pair as its transition payload; no back-transition is modeled here,
/// the host UI owns that.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    AddressEntry,
    RouteView(LocationPair),
}

pub trait Coordinator: Send + Sync {
    fn show_route_map(&self, pair: LocationPair);
    fn present_route_map(&self, pair: LocationPair);
}

/// Observable navigation state: a push path plus a modal slot, each
/// published through its own watch channel.
pub struct NavigationFlow {
    path: watch::Sender<Vec<Screen>>,
    sheet: watch::Sender<Option<Screen>>,
}

impl NavigationFlow {
    pub fn new() -> Self {
        let (path, _) = watch::channel(vec![Screen::AddressEntry]);
        let (sheet, _) = watch::channel(None);
        Self { path, sheet }
    }

    pub fn subscribe_path(&self) -> watch::Receiver<Vec<Screen>> {
        self.path.subscribe()
    }

    pub fn subscribe_sheet(&self) -> watch::Receiver<Option<Screen>> {
        self.sheet.subscribe()
    }

    fn push(&self, screen: Screen) {
        self.path.send_modify(|path| path.push(screen));
    }

    fn present(&self, screen: Screen) {
        self.sheet.send_replace(Some(screen));
    }
}

impl Default for NavigationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator for NavigationFlow {
    fn show_route_map(&self, pair: LocationPair) {
        self.push(Screen::RouteView(pair));
    }

    fn present_route_map(&self, pair: LocationPair) {
        self.present(Screen::RouteView(pair));
    }
}
