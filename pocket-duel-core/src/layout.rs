//! Geometry for the 320x240 device coordinate space.
//!
//! Everything that draws or hit-tests shares these constants, so the menu
//! column, the in-battle action grid and the projectile all agree on where
//! things are regardless of which frontend renders them.

pub const SCREEN_W: i32 = 320;
pub const SCREEN_H: i32 = 240;

// Main menu button column.
pub const MENU_X: i32 = 20;
pub const MENU_W: i32 = 280;
pub const MENU_H: i32 = 45;
pub const MENU_START_Y: i32 = 40;
pub const MENU_GAP: i32 = 10;
pub const MENU_BUTTONS: usize = 4;

// In-battle 2x2 action grid. Wide enough for "name (pp)" labels while both
// columns still fit on screen.
pub const ACTION_W: i32 = 152;
pub const ACTION_H: i32 = 48;
pub const ACTION_GAP: i32 = 6;
pub const ACTION_LEFT_X: i32 = 6;
pub const ACTION_RIGHT_X: i32 = ACTION_LEFT_X + ACTION_W + ACTION_GAP;
pub const ACTION_START_Y: i32 = 142;
pub const ACTION_BUTTONS: usize = 4;

pub const STATUS_TEXT_Y: i32 = 8;

// Sprite placement. Positions are presentation metadata carried on the
// side; the battle rules never read them.
pub const SPRITE_W: i32 = 48;
pub const SPRITE_H: i32 = 48;
pub const LEFT_SPRITE_X: i32 = 40;
pub const RIGHT_SPRITE_X: i32 = 220;
pub const SPRITE_Y: i32 = 60;

// Gameplay tuning and pacing.
pub const RETREAT_HEAL: i32 = 8;
pub const PROJECTILE_SIZE: i32 = 8;
pub const PROJECTILE_STEP_PX: i32 = 6;
pub const PROJECTILE_FRAME_MS: u64 = 20;
pub const DEBOUNCE_MS: u64 = 120;
pub const HIGHLIGHT_MS: u64 = 160;
pub const CPU_THINK_MS: u64 = 400;
pub const MESSAGE_PAUSE_MS: u64 = 900;
pub const SHORT_PAUSE_MS: u64 = 700;
pub const TURN_SWAP_PAUSE_MS: u64 = 200;
pub const RESULT_PAUSE_MS: u64 = 1100;

/// Axis-aligned box in device coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }

    /// Closed-interval overlap: boxes that merely touch still collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.x + self.w < other.x
            || self.x > other.x + other.w
            || self.y + self.h < other.y
            || self.y > other.y + other.h)
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

pub fn menu_button(index: usize) -> Rect {
    let y = MENU_START_Y + index as i32 * (MENU_H + MENU_GAP);
    Rect::new(MENU_X, y, MENU_W, MENU_H)
}

pub fn menu_hit(x: i32, y: i32) -> Option<usize> {
    (0..MENU_BUTTONS).find(|&idx| menu_button(idx).contains(x, y))
}

/// Buttons 0..2 are the three moves, button 3 is Retreat.
pub fn action_button(index: usize) -> Rect {
    let col_x = if index % 2 == 0 { ACTION_LEFT_X } else { ACTION_RIGHT_X };
    let row_y = ACTION_START_Y + (index as i32 / 2) * (ACTION_H + ACTION_GAP);
    Rect::new(col_x, row_y, ACTION_W, ACTION_H)
}

pub fn action_hit(x: i32, y: i32) -> Option<usize> {
    (0..ACTION_BUTTONS).find(|&idx| action_button(idx).contains(x, y))
}

pub fn left_sprite() -> Rect {
    Rect::new(LEFT_SPRITE_X, SPRITE_Y, SPRITE_W, SPRITE_H)
}

pub fn right_sprite() -> Rect {
    Rect::new(RIGHT_SPRITE_X, SPRITE_Y, SPRITE_W, SPRITE_H)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_rects_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(a.intersects(&b));
        let c = Rect::new(21, 0, 10, 10);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = Rect::new(5, 5, 20, 20);
        let b = Rect::new(15, 15, 4, 4);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn contains_includes_edges() {
        let r = Rect::new(10, 10, 10, 10);
        assert!(r.contains(10, 10));
        assert!(r.contains(20, 20));
        assert!(!r.contains(21, 15));
    }

    #[test]
    fn action_grid_hit_testing() {
        for idx in 0..ACTION_BUTTONS {
            let (cx, cy) = action_button(idx).center();
            assert_eq!(action_hit(cx, cy), Some(idx));
        }
        assert_eq!(action_hit(0, 0), None);
    }

    #[test]
    fn menu_hit_respects_gaps() {
        let (cx, cy) = menu_button(2).center();
        assert_eq!(menu_hit(cx, cy), Some(2));
        // a tap in the gap between buttons lands nowhere
        let gap_y = MENU_START_Y + MENU_H + MENU_GAP / 2;
        assert_eq!(menu_hit(MENU_X + 5, gap_y), None);
    }

    #[test]
    fn sprites_sit_on_opposite_halves() {
        assert!(left_sprite().x + SPRITE_W < SCREEN_W / 2);
        assert!(right_sprite().x > SCREEN_W / 2);
    }
}
