use glam::Vec2;
use serde::Serialize;

use super::traits::{Color, DrawSurface, FontSpec, TextAlign};

/// One recorded draw call.
/// Serialized with a `op` tag so a JS host can replay the list on its own canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
        color: Color,
    },
    FillCircle {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    StrokeLine {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    FillText {
        text: String,
        x: f32,
        y: f32,
        font: String,
        align: TextAlign,
        color: Color,
    },
}

/// A [`DrawSurface`] that records every call in order.
#[derive(Debug, Default, Clone)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
}

impl CommandList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(512),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all recorded commands, keeping the allocation.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Text of every `FillText` command, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.commands)
    }
}

impl DrawSurface for CommandList {
    fn clear(&mut self, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Clear { width, height, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            x: center.x,
            y: center.y,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            x1: from.x,
            y1: from.y,
            x2: to.x,
            y2: to.y,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &FontSpec, align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x: pos.x,
            y: pos.y,
            font: font.to_string(),
            align,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let mut list = CommandList::new();
        list.clear(10.0, 10.0, Color::BLACK);
        list.fill_circle(Vec2::new(1.0, 2.0), 3.0, Color::WHITE);
        list.fill_text("Vega", Vec2::ZERO, &FontSpec::new(12.0, "Orbitron"), TextAlign::Center, Color::WHITE);

        assert_eq!(list.len(), 3);
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::FillCircle { radius, .. } if radius == 3.0));
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Vega"]);

        list.clear_commands();
        assert!(list.is_empty());
    }

    #[test]
    fn json_is_tagged_by_op() {
        let mut list = CommandList::new();
        list.stroke_line(Vec2::ZERO, Vec2::ONE, 1.0, Color::WHITE);
        let json = list.to_json().unwrap();
        assert!(json.starts_with("[{\"op\":\"stroke_line\""), "{json}");
        assert!(json.contains("\"color\":\"#FFFFFFFF\""));
    }
}
