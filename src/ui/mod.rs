pub mod common;
pub mod game_scene;
pub mod menu_scene;

use flipping_bird::game::Snapshot;
use menu_scene::ProfileForm;
use ratatui::Frame;

/// Draw whichever screen matches the game state.
pub fn draw_ui(frame: &mut Frame, snap: &Snapshot, form: &ProfileForm) {
    let area = frame.size();
    if snap.shows_menu() {
        menu_scene::render_menu(frame, area, snap, form);
    } else {
        game_scene::render_game(frame, area, snap);
    }
}
