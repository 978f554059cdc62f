//! Terminal User Interface
//!
//! Dashboard renderer for the console using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use crate::console::engine::RiskBand;
use crate::data::{SatelliteStatus, Severity, StationStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the console
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub muted: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Cyan,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            header: Color::Magenta,
        }
    }
}

/// Get color for severity level
pub fn severity_color(severity: &Severity) -> Color {
    match severity {
        Severity::Info => Color::Gray,
        Severity::Medium => Color::Cyan,
        Severity::High => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}

pub fn band_color(band: RiskBand) -> Color {
    match band {
        RiskBand::Low => Color::Green,
        RiskBand::Elevated => Color::Yellow,
        RiskBand::Critical => Color::Red,
    }
}

pub fn satellite_status_color(status: &SatelliteStatus) -> Color {
    match status {
        SatelliteStatus::Nominal => Color::Cyan,
        SatelliteStatus::Warning => Color::Yellow,
        SatelliteStatus::Critical => Color::Red,
    }
}

pub fn station_status_color(status: &StationStatus) -> Color {
    match status {
        StationStatus::Online => Color::Green,
        StationStatus::Offline => Color::Red,
        StationStatus::Maintenance => Color::Yellow,
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// Header logo
pub const SMALL_LOGO: &str = " COSMA // SSA PLATFORM ";

pub const SUBTITLE: &str = "SPACE SITUATIONAL AWARENESS SYSTEM v2.4";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  1-5   Dashboard / Orbit / Assets / Analytics / Settings      ║
║  Tab   Next view                                              ║
║  ?     Toggle this help                                       ║
║  Esc   Close popup                                            ║
║  q     Quit                                                   ║
╠═══════════════════════════════════════════════════════════════╣
║                   COLLISION AVOIDANCE                         ║
╠═══════════════════════════════════════════════════════════════╣
║  ↑/↓   Select risk event                                      ║
║  ←/→   Thrust -/+ 0.1 m/s   (also - and +)                    ║
║  0     Zero thrust                                            ║
║  x     Execute recommended maneuver  (also Enter)             ║
║  m     Toggle risk matrix / Pareto curve                      ║
║  d     Satellite diagnostics                                  ║
║  c     Clear risk selection                                   ║
╠═══════════════════════════════════════════════════════════════╣
║  Assets view: ↑/↓ pick ground station, Enter toggles status   ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(6), // Log pane
            Constraint::Length(1), // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Dashboard grid: wide left column, narrow right column
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(66), // Orbit view + risk analysis
            Constraint::Percentage(34), // Alerts + fuel
        ])
        .split(area)
        .to_vec()
}

/// Split a column into a taller top and a shorter bottom panel
pub fn create_column_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55),
            Constraint::Percentage(45),
        ])
        .split(area)
        .to_vec()
}

/// Centered popup area, clamped to the frame
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
