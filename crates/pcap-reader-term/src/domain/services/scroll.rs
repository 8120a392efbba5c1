/// Vertical scroll position over the rendered chat lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scroll {
    pub position: usize,
    content_len: usize,
    viewport: usize,
}

impl Scroll {
    fn max_position(&self) -> usize {
        return self.content_len.saturating_sub(self.viewport);
    }

    pub fn set_state(&mut self, content_len: usize, viewport: usize) {
        self.content_len = content_len;
        self.viewport = viewport;
        self.position = self.position.min(self.max_position());
    }

    pub fn content_len(&self) -> usize {
        return self.content_len;
    }

    pub fn is_position_at_last(&self) -> bool {
        return self.position >= self.max_position();
    }

    pub fn last(&mut self) {
        self.position = self.max_position();
    }

    pub fn up(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn down(&mut self) {
        self.position = (self.position + 1).min(self.max_position());
    }

    pub fn up_page(&mut self) {
        self.position = self.position.saturating_sub(self.page());
    }

    pub fn down_page(&mut self) {
        self.position = (self.position + self.page()).min(self.max_position());
    }

    fn page(&self) -> usize {
        return (self.viewport / 2).max(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_clamps_to_content() {
        let mut scroll = Scroll::default();
        scroll.set_state(30, 10);

        scroll.up();
        assert_eq!(scroll.position, 0);

        scroll.last();
        assert_eq!(scroll.position, 20);
        assert!(scroll.is_position_at_last());

        scroll.down();
        assert_eq!(scroll.position, 20);

        scroll.up_page();
        assert_eq!(scroll.position, 15);
        scroll.down_page();
        scroll.down_page();
        assert_eq!(scroll.position, 20);
    }

    #[test]
    fn it_stays_at_top_when_content_fits() {
        let mut scroll = Scroll::default();
        scroll.set_state(3, 10);
        scroll.last();
        assert_eq!(scroll.position, 0);
        assert!(scroll.is_position_at_last());
    }

    #[test]
    fn it_follows_shrinking_content() {
        let mut scroll = Scroll::default();
        scroll.set_state(100, 10);
        scroll.last();
        scroll.set_state(40, 10);
        assert_eq!(scroll.position, 30);
    }
}
