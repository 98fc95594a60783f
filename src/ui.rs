//! Hit-testing and pointer routing for the presentation layer
//!
//! Raw pointer events arrive between ticks; `InputCollector` folds them into
//! the next `TickInput`, turning presses on the powerup bar into toggles.

use glam::Vec2;

use crate::consts::{BUTTON_GAP, BUTTON_Y, ICON_SIZE};
use crate::sim::{PowerupKind, TickInput};

/// Closed point-in-rectangle test (`origin` is the top-left corner)
#[inline]
pub fn point_in_rect(p: Vec2, origin: Vec2, size: Vec2) -> bool {
    p.x >= origin.x && p.x <= origin.x + size.x && p.y >= origin.y && p.y <= origin.y + size.y
}

/// One powerup button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub kind: PowerupKind,
    pub origin: Vec2,
    pub size: Vec2,
}

impl Button {
    pub fn contains(&self, p: Vec2) -> bool {
        point_in_rect(p, self.origin, self.size)
    }
}

/// The row of powerup buttons under the field
#[derive(Debug, Clone, PartialEq)]
pub struct PowerupBar {
    pub buttons: Vec<Button>,
}

impl Default for PowerupBar {
    fn default() -> Self {
        Self::standard()
    }
}

impl PowerupBar {
    /// Square icons left to right, one gap apart
    pub fn standard() -> Self {
        let buttons = PowerupKind::ALL
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let i = i as f32;
                Button {
                    kind,
                    origin: Vec2::new(BUTTON_GAP * (1.0 + i) + ICON_SIZE * i, BUTTON_Y),
                    size: Vec2::splat(ICON_SIZE),
                }
            })
            .collect();
        Self { buttons }
    }

    pub fn button_at(&self, p: Vec2) -> Option<PowerupKind> {
        self.buttons.iter().find(|b| b.contains(p)).map(|b| b.kind)
    }

    /// Center of a button, for drivers that synthesize clicks
    pub fn center_of(&self, kind: PowerupKind) -> Option<Vec2> {
        self.buttons
            .iter()
            .find(|b| b.kind == kind)
            .map(|b| b.origin + b.size * 0.5)
    }
}

/// Accumulates pointer events until the next tick consumes them
#[derive(Debug, Clone, Default)]
pub struct InputCollector {
    bar: PowerupBar,
    input: TickInput,
}

impl InputCollector {
    pub fn bar(&self) -> &PowerupBar {
        &self.bar
    }

    pub fn pointer_moved(&mut self, p: Vec2) {
        self.input.pointer = Some(p);
    }

    /// A press on a button toggles that powerup; anywhere else it may pick a player
    pub fn pointer_pressed(&mut self, p: Vec2) {
        self.input.pointer = Some(p);
        match self.bar.button_at(p) {
            Some(kind) => self.input.toggle_powerup = Some(kind),
            None => self.input.pointer_down = Some(p),
        }
    }

    pub fn pointer_released(&mut self, p: Vec2) {
        self.input.pointer = Some(p);
        self.input.pointer_up = Some(p);
    }

    pub fn request_start(&mut self) {
        self.input.start = true;
    }

    /// Input for the next tick. One-shot events are cleared; the pointer position persists.
    pub fn take(&mut self) -> TickInput {
        let input = self.input.clone();
        self.input = TickInput {
            pointer: input.pointer,
            ..Default::default()
        };
        input
    }
}
