//! Presentation adapter: translates engine state into frontend draw calls.

use crate::catalog::sprite_color;
use crate::frontend::{Color, Frontend};
use crate::layout::{self, Rect};
use crate::sim::combatant::Side;

pub fn draw_battle_scene<F: Frontend>(fe: &mut F, sides: &[Side; 2], projectile: Option<Rect>) {
    draw_background(fe);
    draw_status(fe, sides);
    for side in sides {
        draw_sprite(fe, side);
    }
    if let Some(p) = projectile {
        fe.fill_rect(p, Color::Yellow);
    }
}

fn draw_background<F: Frontend>(fe: &mut F) {
    fe.clear_screen(Color::Blue);
    // ground band and sun
    fe.fill_rect(Rect::new(0, 160, layout::SCREEN_W, 80), Color::Brown);
    fe.fill_rect(Rect::new(260, 12, 34, 34), Color::Yellow);
}

fn draw_status<F: Frontend>(fe: &mut F, sides: &[Side; 2]) {
    for (side, x) in sides.iter().zip([8, 170]) {
        fe.write_text_at(
            &format!("{} ({})", side.combatant.name, side.label),
            x,
            layout::STATUS_TEXT_Y,
        );
        fe.write_text_at(
            &format!("HP: {}/{}", side.combatant.hp, side.combatant.max_hp),
            x,
            layout::STATUS_TEXT_Y + 14,
        );
        if side.combatant.defending {
            fe.write_text_at("[Defending]", x, layout::STATUS_TEXT_Y + 28);
        }
    }
}

fn draw_sprite<F: Frontend>(fe: &mut F, side: &Side) {
    let s = side.sprite;
    fe.draw_rect(Rect::new(s.x - 6, s.y - 6, s.w + 12, s.h + 12));
    fe.fill_rect(s, sprite_color(&side.combatant.name));

    // eye mark, mirrored for the right-hand side
    let flip = s.x > layout::SCREEN_W / 2;
    let cx = s.x + if flip { s.w / 4 } else { 3 * s.w / 4 };
    let cy = s.y + s.h / 4;
    fe.fill_rect(Rect::new(cx - 2, cy - 2, 4, 4), Color::Black);

    // hp bar above the frame
    let filled = if side.combatant.max_hp > 0 {
        side.combatant.hp * s.w / side.combatant.max_hp
    } else {
        0
    };
    fe.fill_rect(Rect::new(s.x, s.y - 10, s.w, 6), Color::Red);
    if filled > 0 {
        fe.fill_rect(Rect::new(s.x, s.y - 10, filled, 6), Color::Green);
    }
}

/// Draw the 2x2 action grid, optionally highlighting one button.
pub fn draw_action_grid<F: Frontend>(fe: &mut F, labels: &[String; 4], highlight: Option<usize>) {
    for (idx, label) in labels.iter().enumerate() {
        let rect = layout::action_button(idx);
        if highlight == Some(idx) {
            fe.fill_rect(rect, Color::Black);
        }
        fe.draw_rect(rect);
        fe.write_text_at(label, rect.x + 6, rect.y + 12);
    }
}

/// Clear the screen, show a short message and hold it for pacing.
pub fn flash_message<F: Frontend>(fe: &mut F, text: &str, pause_ms: u64) {
    flash_lines(fe, &[text], pause_ms);
}

pub fn flash_lines<F: Frontend>(fe: &mut F, lines: &[&str], pause_ms: u64) {
    fe.clear_screen(Color::Black);
    for line in lines {
        fe.write_line(line);
    }
    fe.present_frame();
    fe.sleep_ms(pause_ms);
}
