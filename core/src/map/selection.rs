/// Single-site selection: choosing a new site always releases the old one.
#[derive(Debug, Default)]
pub struct SelectionState {
    selected: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a site by catalog index, returning the index that must be
    /// restored to the normal marker style, if any.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        self.selected.replace(index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn clear(&mut self) -> Option<usize> {
        self.selected.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_a_second_site_releases_the_first() {
        let mut selection = SelectionState::new();
        assert_eq!(selection.select(3), None);
        assert!(selection.is_selected(3));

        assert_eq!(selection.select(7), Some(3));
        assert!(selection.is_selected(7));
        assert!(!selection.is_selected(3));
    }

    #[test]
    fn at_most_one_site_is_selected() {
        let mut selection = SelectionState::new();
        selection.select(1);
        selection.select(2);
        assert_eq!(selection.selected(), Some(2));
        assert_eq!(selection.clear(), Some(2));
        assert_eq!(selection.selected(), None);
    }
}
