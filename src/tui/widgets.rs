//! Custom widgets for the console UI

use crate::data::{Alert, Severity};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// A labelled level bar where low values are the danger zone (fuel)
pub struct LevelBar {
    value: f64,
    max: f64,
    label: String,
    color: Color,
    warning_below: f64,
    danger_below: f64,
}

impl LevelBar {
    pub fn new(label: &str, value: f64, max: f64) -> Self {
        Self {
            value,
            max,
            label: label.to_string(),
            color: Color::Cyan,
            warning_below: 50.0,
            danger_below: 20.0,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn warning_below(mut self, threshold: f64) -> Self {
        self.warning_below = threshold;
        self
    }

    pub fn danger_below(mut self, threshold: f64) -> Self {
        self.danger_below = threshold;
        self
    }

    fn level_color(&self) -> Color {
        if self.value < self.danger_below {
            Color::Red
        } else if self.value < self.warning_below {
            Color::Yellow
        } else {
            self.color
        }
    }
}

impl Widget for LevelBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 1 {
            return;
        }

        let color = self.level_color();

        // Label left, value right
        buf.set_string(area.x, area.y, &self.label, Style::default());
        let value = format!("{:.0}%", self.value);
        let value_x = area.x + area.width.saturating_sub(value.len() as u16);
        buf.set_string(value_x, area.y, &value, Style::default().fg(color));

        if area.height > 1 {
            let bar_y = area.y + 1;
            let inner = area.width - 2;
            let ratio = if self.max > 0.0 {
                (self.value / self.max).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let filled = (ratio * inner as f64).round() as u16;

            buf.set_string(area.x, bar_y, "[", Style::default());
            buf.set_string(area.x + area.width - 1, bar_y, "]", Style::default());
            for x in 0..filled {
                buf.set_string(area.x + 1 + x, bar_y, "█", Style::default().fg(color));
            }
            for x in filled..inner {
                buf.set_string(area.x + 1 + x, bar_y, "░", Style::default().fg(Color::DarkGray));
            }
        }
    }
}

/// One alert center entry; the symbol blinks for critical alerts
pub struct AlertIndicator<'a> {
    alert: &'a Alert,
    blink_on: bool,
}

impl<'a> AlertIndicator<'a> {
    pub fn new(alert: &'a Alert) -> Self {
        Self {
            alert,
            blink_on: true,
        }
    }

    pub fn blink(mut self, on: bool) -> Self {
        self.blink_on = on;
        self
    }
}

impl Widget for AlertIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 1 {
            return;
        }
        let color = super::severity_color(&self.alert.severity);
        let symbol = if self.alert.severity == Severity::Critical && !self.blink_on {
            " "
        } else {
            self.alert.severity.symbol()
        };

        let head = format!("{} {}", symbol, self.alert.kind);
        buf.set_string(area.x, area.y, &head, Style::default().fg(color).add_modifier(Modifier::BOLD));
        let stamp_x = area.x + area.width.saturating_sub(self.alert.timestamp.len() as u16);
        buf.set_string(stamp_x, area.y, &self.alert.timestamp, Style::default().fg(Color::DarkGray));

        if area.height > 1 {
            buf.set_stringn(
                area.x + 2,
                area.y + 1,
                &self.alert.message,
                area.width.saturating_sub(2) as usize,
                Style::default().fg(Color::White),
            );
        }
    }
}

/// Double-line bordered box for collision warnings
pub struct WarningBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
}

impl WarningBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Red,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for WarningBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 2 {
            return;
        }
        let style = Style::default().fg(self.border_color);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        // Top border
        buf.set_string(area.x, area.y, "╔", style);
        for x in area.x + 1..right {
            buf.set_string(x, area.y, "═", style);
        }
        buf.set_string(right, area.y, "╗", style);

        // Title
        buf.set_stringn(
            area.x + 2,
            area.y,
            format!(" {} ", self.title),
            area.width.saturating_sub(4) as usize,
            style.add_modifier(Modifier::BOLD),
        );

        // Sides
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, "║", style);
            buf.set_string(right, y, "║", style);
        }

        // Bottom border
        buf.set_string(area.x, bottom, "╚", style);
        for x in area.x + 1..right {
            buf.set_string(x, bottom, "═", style);
        }
        buf.set_string(right, bottom, "╝", style);

        // Content
        for (i, line) in self.content.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= bottom {
                break;
            }
            buf.set_stringn(
                area.x + 2,
                y,
                line,
                area.width.saturating_sub(4) as usize,
                Style::default().fg(Color::White),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AlertKind;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn level_bar_fills_proportionally() {
        let area = Rect::new(0, 0, 12, 2);
        let mut buf = Buffer::empty(area);
        LevelBar::new("FUEL", 50.0, 100.0).render(area, &mut buf);
        let bar = row(&buf, 1);
        assert_eq!(bar.matches('█').count(), 5);
        assert_eq!(bar.matches('░').count(), 5);
        assert!(row(&buf, 0).starts_with("FUEL"));
    }

    #[test]
    fn critical_alert_symbol_blinks() {
        let alert = Alert {
            id: "AL-01".to_string(),
            kind: AlertKind::Asat,
            message: "KINETIC TEST".to_string(),
            severity: Severity::Critical,
            timestamp: "T-00:02:00".to_string(),
        };
        let area = Rect::new(0, 0, 30, 2);
        let mut buf = Buffer::empty(area);
        AlertIndicator::new(&alert).blink(false).render(area, &mut buf);
        assert!(row(&buf, 0).starts_with("  ASAT"));
        assert!(row(&buf, 0).ends_with("T-00:02:00"));
    }

    #[test]
    fn warning_box_survives_tiny_area() {
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        WarningBox::new("COLLISION WARNING").render(area, &mut buf);
    }
}
