/// Everything a menu entry can do. Dispatch lives in the app layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Resume,
    Quit,
    Retry,
    Exit,
}

#[derive(Copy, Clone, Debug)]
pub struct MenuItem {
    pub label: &'static str,
    pub action: MenuAction,
}

const START_ITEMS: &[MenuItem] = &[
    MenuItem { label: "Start Game", action: MenuAction::Start },
    MenuItem { label: "Exit", action: MenuAction::Exit },
];

const PAUSE_ITEMS: &[MenuItem] = &[
    MenuItem { label: "Resume", action: MenuAction::Resume },
    MenuItem { label: "Quit to Menu", action: MenuAction::Quit },
    MenuItem { label: "Exit", action: MenuAction::Exit },
];

const GAME_OVER_ITEMS: &[MenuItem] = &[
    MenuItem { label: "Retry", action: MenuAction::Retry },
    MenuItem { label: "Exit", action: MenuAction::Exit },
];

/// A fixed item list plus a wrapping selection cursor. Constructing a
/// menu resets the cursor, matching the rule that the selection starts
/// at the top whenever a menu is shown.
#[derive(Clone, Debug)]
pub struct Menu {
    title: &'static str,
    items: &'static [MenuItem],
    selected: usize,
}

impl Menu {
    pub fn start() -> Self {
        Menu::new("SNAKE", START_ITEMS)
    }

    pub fn paused() -> Self {
        Menu::new("PAUSED", PAUSE_ITEMS)
    }

    pub fn game_over() -> Self {
        Menu::new("GAME OVER", GAME_OVER_ITEMS)
    }

    fn new(title: &'static str, items: &'static [MenuItem]) -> Self {
        Menu { title, items, selected: 0 }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn items(&self) -> &'static [MenuItem] {
        self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn move_up(&mut self) {
        self.selected = (self.selected + self.items.len() - 1) % self.items.len();
    }

    pub fn move_down(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn selected_action(&self) -> MenuAction {
        self.items[self.selected].action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_starts_at_the_top() {
        assert_eq!(Menu::start().selected(), 0);
        assert_eq!(Menu::paused().selected(), 0);
        assert_eq!(Menu::game_over().selected(), 0);
    }

    #[test]
    fn k_downs_land_on_k_mod_n() {
        let n = Menu::paused().items().len();
        for k in 0..12 {
            let mut menu = Menu::paused();
            for _ in 0..k {
                menu.move_down();
            }
            assert_eq!(menu.selected(), k % n, "after {k} downs");
        }
    }

    #[test]
    fn up_wraps_to_the_bottom() {
        let mut menu = Menu::start();
        menu.move_up();
        assert_eq!(menu.selected(), menu.items().len() - 1);
        menu.move_down();
        assert_eq!(menu.selected(), 0);
    }

    #[test]
    fn selection_drives_the_action() {
        let mut menu = Menu::paused();
        assert_eq!(menu.selected_action(), MenuAction::Resume);
        menu.move_down();
        assert_eq!(menu.selected_action(), MenuAction::Quit);
        menu.move_down();
        assert_eq!(menu.selected_action(), MenuAction::Exit);
    }

    #[test]
    fn each_state_has_its_own_items() {
        assert_eq!(Menu::start().items().len(), 2);
        assert_eq!(Menu::paused().items().len(), 3);
        assert_eq!(Menu::game_over().items().len(), 2);
        assert_eq!(Menu::game_over().selected_action(), MenuAction::Retry);
    }
}
