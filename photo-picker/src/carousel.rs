/// Data source and selection state of the album carousel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumCarousel {
    titles: Vec<String>,
    selected: Option<usize>,
}

impl AlbumCarousel {
    /// Replace the titles. The previous selection is forgotten.
    pub fn reload(&mut self, titles: Vec<String>) {
        self.titles = titles;
        self.selected = None;
    }

    pub fn number_of_items(&self) -> usize {
        self.titles.len()
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn selected_item(&self) -> Option<usize> {
        self.selected
    }

    /// Returns true when the selection actually changed
    pub fn did_select_item(&mut self, index: usize) -> bool {
        if index >= self.titles.len() || self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        true
    }
}
