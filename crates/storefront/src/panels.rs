use std::collections::BTreeSet;

/// Side panel state: at most one panel open at a time.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    Open(String),
}

#[derive(Debug, Default, Clone)]
pub struct Panels {
    state: PanelState,
    /// Panel ids present on the page, when the adapter has reported them.
    known: Option<BTreeSet<String>>,
}

impl Panels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_known(&mut self, ids: impl IntoIterator<Item = String>) {
        self.known = Some(ids.into_iter().collect());
    }

    /// Closes every panel, then opens `id` if the page has it.
    ///
    /// Returns `true` if the state changed.
    pub fn open(&mut self, id: &str) -> bool {
        let exists = self.known.as_ref().is_none_or(|k| k.contains(id)) && !id.is_empty();
        let next = if exists {
            PanelState::Open(id.to_string())
        } else {
            PanelState::Closed
        };
        self.transition(next)
    }

    pub fn close(&mut self) -> bool {
        self.transition(PanelState::Closed)
    }

    /// Closes everything but keeps the known panel ids.
    pub fn reset(&mut self) {
        self.state = PanelState::Closed;
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn open_panel(&self) -> Option<&str> {
        match &self.state {
            PanelState::Open(id) => Some(id),
            PanelState::Closed => None,
        }
    }

    fn transition(&mut self, next: PanelState) -> bool {
        if self.state == next {
            return false;
        }
        self.state = next;
        true
    }
}
