//! Main application state and rendering

use crate::config::ConsoleConfig;
use crate::console::clock::{Scheduler, TimeSource};
use crate::console::engine::{self, SAFETY_THRESHOLD};
use crate::console::selection::{DELTA_V_MAX, DELTA_V_STEP};
use crate::console::snapshot::DerivedView;
use crate::console::visual;
use crate::console::{Console, ConsoleAction};
use crate::data::{by_severity, fleet_average_fuel, Satellite, Severity};
use crate::tui::widgets::{AlertIndicator, LevelBar, WarningBox};
use crate::tui::{
    band_color, centered_rect, create_column_layout, create_content_layout, create_main_layout,
    satellite_status_color, severity_color, station_status_color, styled_block, Theme, HELP_TEXT,
    SMALL_LOGO, SUBTITLE,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, LineGauge, List, ListItem,
        ListState, Paragraph, Row, Table, Wrap,
    },
    Frame,
};
use std::collections::VecDeque;
use std::f64::consts::{FRAC_PI_4, TAU};
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// Lines of tracing output kept for the system log pane
const SYSTEM_LOG_CAPACITY: usize = 200;

/// Longest time input polling may block
const MAX_POLL: Duration = Duration::from_millis(100);

/// Application state
pub struct App {
    pub console: Console,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub show_diagnostics: bool,
    pub current_screen: Screen,
    pub risk_view: RiskView,
    pub station_state: ListState,
    pub system_log: VecDeque<String>,
    pub blink_on: bool,
    log_rx: Option<Receiver<String>>,
    scheduler: Scheduler<Periodic>,
    time: Box<dyn TimeSource>,
}

/// Top-level views, in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Orbit,
    Assets,
    Analytics,
    Settings,
}

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Dashboard,
        Screen::Orbit,
        Screen::Assets,
        Screen::Analytics,
        Screen::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Dashboard => "DASHBOARD",
            Screen::Orbit => "ORBIT",
            Screen::Assets => "ASSETS",
            Screen::Analytics => "ANALYTICS",
            Screen::Settings => "SETTINGS",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }
}

/// Which chart the risk analysis panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskView {
    Matrix,
    Pareto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Periodic {
    ClockTick,
    Blink,
}

impl App {
    pub fn new(console: Console, config: &ConsoleConfig, time: Box<dyn TimeSource>) -> Self {
        let now = time.now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(now, to_chrono(config.tick_interval()), Periodic::ClockTick);
        scheduler.schedule_every(now, to_chrono(config.blink_interval()), Periodic::Blink);

        let mut station_state = ListState::default();
        station_state.select(Some(0));

        Self {
            console,
            theme: Theme::default(),
            running: true,
            show_help: false,
            show_diagnostics: false,
            current_screen: Screen::Dashboard,
            risk_view: RiskView::Matrix,
            station_state,
            system_log: VecDeque::new(),
            blink_on: true,
            log_rx: None,
            scheduler,
            time,
        }
    }

    /// Route tracing output into the system log pane
    pub fn with_log_receiver(mut self, rx: Receiver<String>) -> Self {
        self.log_rx = Some(rx);
        self
    }

    /// Run due periodic work and collect log output
    pub fn update(&mut self) {
        let now = self.time.now();
        self.update_at(now);
    }

    pub fn update_at(&mut self, now: DateTime<Utc>) {
        // Missed clock ticks collapse into one refresh at `now`
        let mut clock_due = false;
        for task in self.scheduler.due(now) {
            match task {
                Periodic::ClockTick => clock_due = true,
                Periodic::Blink => self.blink_on = !self.blink_on,
            }
        }
        if clock_due {
            self.console.tick(now);
        }
        self.drain_logs();
    }

    fn drain_logs(&mut self) {
        let Some(rx) = self.log_rx.as_ref() else {
            return;
        };
        while let Ok(text) = rx.try_recv() {
            for line in text.lines().filter(|l| !l.trim().is_empty()) {
                self.system_log.push_back(line.to_string());
            }
        }
        while self.system_log.len() > SYSTEM_LOG_CAPACITY {
            self.system_log.pop_front();
        }
    }

    /// How long input polling may block before the next periodic task
    fn poll_timeout(&self) -> Duration {
        self.scheduler
            .next_due()
            .and_then(|due| (due - self.time.now()).to_std().ok())
            .map(|d| d.min(MAX_POLL))
            .unwrap_or(Duration::ZERO)
    }

    /// Handle keyboard input
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(self.poll_timeout())? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }
                return Ok(self.handle_key(key.code));
            }
        }
        Ok(true)
    }

    /// Returns false once the operator asked to quit
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        // Overlays swallow input until closed
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return true;
        }
        if self.show_diagnostics {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('d')) {
                self.show_diagnostics = false;
            }
            return true;
        }

        match code {
            KeyCode::Char('q') => {
                self.running = false;
                return false;
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.current_screen = self.current_screen.next(),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.current_screen = Screen::ALL[index];
            }
            _ => match self.current_screen {
                Screen::Dashboard | Screen::Orbit => self.handle_risk_key(code),
                Screen::Assets => self.handle_assets_key(code),
                Screen::Analytics | Screen::Settings => {}
            },
        }
        true
    }

    fn handle_risk_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.step_risk(-1),
            KeyCode::Down => self.step_risk(1),
            KeyCode::Left | KeyCode::Char('-') => self.dispatch(ConsoleAction::NudgeDeltaV(-DELTA_V_STEP)),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.dispatch(ConsoleAction::NudgeDeltaV(DELTA_V_STEP))
            }
            KeyCode::Char('0') => self.dispatch(ConsoleAction::SetDeltaV(0.0)),
            KeyCode::Char('x') | KeyCode::Enter => self.dispatch(ConsoleAction::ExecuteManeuver),
            KeyCode::Char('c') => self.dispatch(ConsoleAction::ClearSelection),
            KeyCode::Char('m') => {
                self.risk_view = match self.risk_view {
                    RiskView::Matrix => RiskView::Pareto,
                    RiskView::Pareto => RiskView::Matrix,
                };
            }
            KeyCode::Char('d') => {
                if self.console.current_satellite().is_some() {
                    self.show_diagnostics = true;
                }
            }
            _ => {}
        }
    }

    fn handle_assets_key(&mut self, code: KeyCode) {
        let count = self.console.catalog.ground_stations.len();
        if count == 0 {
            return;
        }
        let i = self.station_state.selected().unwrap_or(0).min(count - 1);
        match code {
            KeyCode::Up => self.station_state.select(Some(i.saturating_sub(1))),
            KeyCode::Down => self.station_state.select(Some((i + 1).min(count - 1))),
            KeyCode::Enter | KeyCode::Char(' ') => self.dispatch(ConsoleAction::CycleStation(i)),
            _ => {}
        }
    }

    /// Move the risk selection up or down the catalog, wrapping
    fn step_risk(&mut self, offset: isize) {
        let count = self.console.catalog.risks.len();
        if count == 0 {
            return;
        }
        let next = match self
            .console
            .selection()
            .risk_id()
            .and_then(|id| self.console.catalog.risk_index(id))
        {
            Some(i) => (i as isize + offset).rem_euclid(count as isize) as usize,
            None => 0,
        };
        let id = self.console.catalog.risks[next].id.clone();
        self.dispatch(ConsoleAction::SelectRisk(id));
    }

    fn dispatch(&mut self, action: ConsoleAction) {
        // Rejections are already recorded in the console message log
        let _ = self.console.apply(action);
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = create_main_layout(area);

        self.render_header(frame, layout[0]);

        match self.current_screen {
            Screen::Dashboard => self.render_dashboard(frame, layout[1]),
            Screen::Orbit => self.render_orbit_view(frame, layout[1]),
            Screen::Assets => self.render_assets(frame, layout[1]),
            Screen::Analytics | Screen::Settings => self.render_placeholder(frame, layout[1]),
        }

        self.render_logs(frame, layout[2]);
        self.render_status_bar(frame, layout[3]);

        if self.show_diagnostics {
            self.render_diagnostics(frame);
        }
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(26),
                Constraint::Min(20),
                Constraint::Length(30),
            ])
            .split(area);

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(logo, header_layout[0]);

        // Navigation + link status
        let mut spans: Vec<Span> = Vec::new();
        for (i, screen) in Screen::ALL.iter().enumerate() {
            let style = if *screen == self.current_screen {
                Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(self.theme.muted)
            };
            spans.push(Span::styled(format!("{}:{}", i + 1, screen.title()), style));
            spans.push(Span::raw("  "));
        }
        let secure_style = if self.blink_on {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.muted)
        };
        spans.push(Span::styled("◆ COSMA SECURE", secure_style));
        spans.push(Span::styled("  TraCCS: ONLINE", Style::default().fg(self.theme.muted)));
        let nav = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)).title(Span::styled(format!(" {} ", SUBTITLE), Style::default().fg(self.theme.muted))));
        frame.render_widget(nav, header_layout[1]);

        let time = Paragraph::new(Line::from(vec![
            Span::styled(self.console.clock.format("%H:%M:%S UTC").to_string(), Style::default().fg(self.theme.accent)),
            Span::styled("  DEFCON 4 ", Style::default().fg(self.theme.alert)),
        ]))
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(time, header_layout[2]);
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect) {
        let columns = create_content_layout(area);
        let left = create_column_layout(columns[0]);
        let right = create_column_layout(columns[1]);

        self.render_orbit_view(frame, left[0]);
        self.render_risk_analysis(frame, left[1]);
        self.render_alerts(frame, right[0]);
        self.render_fuel(frame, right[1]);
    }

    fn render_orbit_view(&self, frame: &mut Frame, area: Rect) {
        let derived = DerivedView::compute(&self.console);
        let risk_satellite = self.console.current_satellite().map(|s| s.id.clone());
        let t = self.time.now().timestamp_millis() as f64 / 1000.0;
        let blink_on = self.blink_on;

        // Satellites not involved in the selected risk get background rings
        let background: Vec<(f64, String, f64)> = self
            .console
            .catalog
            .satellites
            .iter()
            .enumerate()
            .filter(|(_, sat)| Some(&sat.id) != risk_satellite.as_ref())
            .map(|(i, sat)| {
                let radius = visual::background_ring_diameter(i) / 2.0;
                let period = 60.0 + i as f64 * 20.0;
                (radius, sat.name.clone(), TAU * t / period)
            })
            .collect();
        let satellite_name = self.console.current_satellite().map(|s| s.name.clone());
        let active_hazards = self.active_hazards();

        let title = format!(
            "GLOBAL ORBIT VIEW ── {} LIVE FEED • {} Mb/s",
            if blink_on { "●" } else { "○" },
            self.console.telemetry_rate()
        );

        let canvas = Canvas::default()
            .block(styled_block(&title, &self.theme))
            .marker(Marker::Braille)
            .x_bounds([-260.0, 260.0])
            .y_bounds([-260.0, 260.0])
            .paint(move |ctx| {
                // Earth
                ctx.draw(&Circle { x: 0.0, y: 0.0, radius: 50.0, color: Color::Blue });
                ctx.draw(&CanvasLine { x1: -50.0, y1: 0.0, x2: 50.0, y2: 0.0, color: Color::DarkGray });
                ctx.draw(&CanvasLine { x1: 0.0, y1: -50.0, x2: 0.0, y2: 50.0, color: Color::DarkGray });

                for (radius, name, angle) in &background {
                    ctx.draw(&Circle { x: 0.0, y: 0.0, radius: *radius, color: Color::DarkGray });
                    ctx.print(
                        radius * angle.cos(),
                        radius * angle.sin(),
                        Span::styled(format!("◇ {}", name), Style::default().fg(Color::Gray)),
                    );
                }

                if let (Some(view), Some(name)) = (&derived, &satellite_name) {
                    let orbit_radius = view.orbit_ring_diameter / 2.0;

                    // Debris path: ring tilted 75° out of the screen plane, rotated
                    let tilt = 75f64.to_radians().cos();
                    let rotation = view.debris_approach_angle.to_radians();
                    let debris: Vec<(f64, f64)> = (0..120)
                        .filter(|i| i % 4 < 2)
                        .map(|i| rotate(ellipse(orbit_radius, tilt, TAU * i as f64 / 120.0), rotation))
                        .collect();
                    ctx.draw(&Points { coords: &debris, color: Color::Red });
                    let (dx, dy) = rotate(ellipse(orbit_radius, tilt, -TAU * t / 8.0), rotation);
                    ctx.print(dx, dy, Span::styled("☄", Style::default().fg(Color::Red)));

                    // Pre-burn path, dimmed once a burn is planned
                    let pre_burn = if view.delta_v > 0.0 { Color::DarkGray } else { Color::White };
                    ctx.draw(&Circle { x: 0.0, y: 0.0, radius: orbit_radius, color: pre_burn });

                    // Maneuvered orbit
                    let maneuver_radius = view.maneuver_ring_diameter / 2.0;
                    if view.delta_v > 0.0 {
                        ctx.draw(&Circle { x: 0.0, y: 0.0, radius: maneuver_radius, color: Color::Cyan });
                    }
                    ctx.layer();

                    // Time of closest approach marker
                    let (tx, ty) = (orbit_radius * FRAC_PI_4.cos(), orbit_radius * FRAC_PI_4.sin());
                    let marker = if blink_on { "✛ IMPACT ZONE" } else { "  IMPACT ZONE" };
                    ctx.print(tx, ty, Span::styled(marker, Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)));

                    let angle = TAU * t / 25.0;
                    let (sx, sy) = (maneuver_radius * angle.cos(), maneuver_radius * angle.sin());
                    let label = if view.delta_v > 0.0 {
                        format!("▲ {} ORBIT RAISING...", name)
                    } else {
                        format!("▲ {}", name)
                    };
                    ctx.print(sx, sy, Span::styled(label, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)));
                }

                ctx.print(-255.0, -205.0, Span::styled("FOV: 120°", Style::default().fg(Color::Gray)));
                ctx.print(-255.0, -225.0, Span::styled("TRACKING: 14,203 OBJECTS", Style::default().fg(Color::Gray)));
                ctx.print(
                    -255.0,
                    -245.0,
                    Span::styled(format!("ACTIVE HAZARDS: {}", active_hazards), Style::default().fg(Color::Red)),
                );
            });
        frame.render_widget(canvas, area);
    }

    /// Risks outside the low band, using the planned burn for the selected one
    fn active_hazards(&self) -> usize {
        let selected = self.console.selection().risk_id();
        self.console
            .catalog
            .risks
            .iter()
            .filter(|risk| {
                let probability = if Some(risk.id.as_str()) == selected {
                    engine::simulate(risk, self.console.delta_v()).simulated_probability
                } else {
                    risk.probability
                };
                engine::risk_band(probability, risk.impact) != engine::RiskBand::Low
            })
            .count()
    }

    fn render_risk_analysis(&self, frame: &mut Frame, area: Rect) {
        let (matrix_style, pareto_style) = match self.risk_view {
            RiskView::Matrix => (Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD), Style::default().fg(self.theme.muted)),
            RiskView::Pareto => (Style::default().fg(self.theme.muted), Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD)),
        };
        let block = styled_block("RISK ANALYSIS", &self.theme).title(
            Line::from(vec![
                Span::styled(" MATRIX ", matrix_style),
                Span::raw("│"),
                Span::styled(" PARETO ", pareto_style),
                Span::styled("[m] ", Style::default().fg(self.theme.muted)),
            ])
            .alignment(Alignment::Right),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
            .split(inner);

        match self.risk_view {
            RiskView::Matrix => self.render_matrix(frame, chunks[0]),
            RiskView::Pareto => self.render_pareto(frame, chunks[0]),
        }
        self.render_simulation_controls(frame, chunks[1]);
    }

    fn render_matrix(&self, frame: &mut Frame, area: Rect) {
        let selected = self.console.selection().risk_id().map(str::to_string);
        let delta_v = self.console.delta_v();
        let points: Vec<(f64, f64, String, bool, Color)> = self
            .console
            .catalog
            .risks
            .iter()
            .map(|risk| {
                let is_selected = selected.as_deref() == Some(risk.id.as_str());
                let probability = if is_selected {
                    engine::simulate(risk, delta_v).simulated_probability
                } else {
                    risk.probability
                };
                let color = band_color(engine::risk_band(probability, risk.impact));
                (risk.impact, probability, risk.object.clone(), is_selected, color)
            })
            .collect();

        let canvas = Canvas::default()
            .block(Block::default().borders(Borders::LEFT | Borders::BOTTOM).border_style(Style::default().fg(self.theme.border)))
            .marker(Marker::Braille)
            .x_bounds([0.0, 10.0])
            .y_bounds([0.0, 1.0])
            .paint(move |ctx| {
                // Quadrant guides; top-right is the critical quadrant
                ctx.draw(&CanvasLine { x1: 5.0, y1: 0.0, x2: 5.0, y2: 1.0, color: Color::DarkGray });
                ctx.draw(&CanvasLine { x1: 0.0, y1: 0.5, x2: 10.0, y2: 0.5, color: Color::DarkGray });
                ctx.print(0.0, 1.0, Span::styled("100%", Style::default().fg(Color::DarkGray)));
                ctx.print(0.0, 0.5, Span::styled("50%", Style::default().fg(Color::DarkGray)));
                ctx.print(0.0, 0.02, Span::styled("LOW", Style::default().fg(Color::DarkGray)));
                ctx.print(4.6, 0.02, Span::styled("MED", Style::default().fg(Color::DarkGray)));
                ctx.print(9.0, 0.02, Span::styled("HIGH", Style::default().fg(Color::DarkGray)));
                ctx.layer();

                for (impact, probability, label, is_selected, color) in &points {
                    let (glyph, style) = if *is_selected {
                        ("●", Style::default().fg(*color).add_modifier(Modifier::BOLD | Modifier::REVERSED))
                    } else {
                        ("○", Style::default().fg(*color))
                    };
                    ctx.print(*impact, *probability, Span::styled(format!("{} {}", glyph, label), style));
                }
            });
        frame.render_widget(canvas, area);
    }

    fn render_pareto(&self, frame: &mut Frame, area: Rect) {
        let Some(risk) = self.console.current_risk() else {
            let empty = Paragraph::new("SELECT A RISK EVENT")
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.muted));
            frame.render_widget(empty, area);
            return;
        };

        let curve: Vec<(f64, f64)> = visual::pareto_curve(risk)
            .map(|p| (p.delta_v, p.probability))
            .collect();
        let threshold = vec![(0.0, SAFETY_THRESHOLD), (DELTA_V_MAX, SAFETY_THRESHOLD)];
        let delta_v = self.console.delta_v();
        let simulated = engine::simulate(risk, delta_v).simulated_probability;
        let marker_point = visual::pareto_marker(delta_v, simulated);
        let marker = vec![(marker_point.delta_v, marker_point.probability)];

        let datasets = vec![
            Dataset::default()
                .name("Pc(Δv)")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::White))
                .data(&curve),
            Dataset::default()
                .name("threshold")
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&threshold),
            Dataset::default()
                .name("now")
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(self.theme.accent))
                .data(&marker),
        ];

        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .title("Δv")
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, DELTA_V_MAX])
                    .labels(vec![Span::raw("0"), Span::raw("2.5"), Span::raw("5")]),
            )
            .y_axis(
                Axis::default()
                    .title("Pc")
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, 1.0])
                    .labels(vec![Span::raw("0%"), Span::raw("50%"), Span::raw("100%")]),
            );
        frame.render_widget(chart, area);
    }

    fn render_simulation_controls(&self, frame: &mut Frame, area: Rect) {
        let (Some(risk), Some(outcome)) = (self.console.current_risk(), self.console.outcome()) else {
            let empty = Paragraph::new("\nSELECT A RISK EVENT\n[↑/↓]")
                .alignment(Alignment::Center)
                .style(Style::default().fg(self.theme.muted));
            frame.render_widget(empty, area);
            return;
        };
        let satellite = self.console.current_satellite();
        let delta_v = self.console.delta_v();

        let mut constraints = vec![Constraint::Length(2)];
        if !outcome.is_safe {
            constraints.push(Constraint::Length(4));
        }
        if outcome.secondary_collision.is_some() {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Length(2)); // thrust slider
        constraints.push(Constraint::Min(3)); // details
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        let mut next = 0;

        let title = Paragraph::new(vec![
            Line::from(Span::styled(risk.label(), Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))),
            Line::from(Span::styled("COLLISION AVOIDANCE", Style::default().fg(self.theme.muted))),
        ]);
        frame.render_widget(title, rows[next]);
        next += 1;

        if !outcome.is_safe {
            let warning = WarningBox::new("COLLISION WARNING")
                .content(vec![
                    "Probability exceeds safety threshold.".to_string(),
                    format!("REC: BURN {} m/s  [x] EXECUTE", risk.recommended_dv),
                ])
                .border_color(self.theme.alert);
            frame.render_widget(warning, rows[next]);
            next += 1;
        }

        if let Some(hazard) = outcome.secondary_collision {
            let warning = WarningBox::new("SECONDARY CONJUNCTION")
                .content(vec![format!("Path intersects {}", hazard)])
                .border_color(self.theme.warning);
            frame.render_widget(warning, rows[next]);
            next += 1;
        }

        let slider = LineGauge::default()
            .label(format!("THRUST (Δv): {:.1} m/s ", delta_v))
            .ratio((delta_v / DELTA_V_MAX).clamp(0.0, 1.0))
            .filled_style(Style::default().fg(self.theme.accent))
            .unfilled_style(Style::default().fg(self.theme.muted));
        frame.render_widget(slider, rows[next]);
        next += 1;

        let mut lines: Vec<Line> = Vec::new();
        if outcome.is_safe {
            lines.push(Line::from(Span::styled("OPTIMAL TRAJECTORY SET", Style::default().fg(self.theme.accent))));
        }
        match satellite {
            Some(sat) => {
                let fuel_color = if sat.is_low_fuel() { self.theme.alert } else { self.theme.accent };
                lines.push(Line::from(vec![
                    Span::styled("FUEL ", Style::default().fg(self.theme.muted)),
                    Span::styled(format!("{:.0}%", sat.fuel_pct), Style::default().fg(fuel_color)),
                    Span::styled("   ALT ", Style::default().fg(self.theme.muted)),
                    Span::raw(format!("{:.0} km", sat.altitude_km)),
                ]));
            }
            None => lines.push(Line::from(Span::styled("NO SATELLITE DATA", Style::default().fg(self.theme.muted)))),
        }
        if delta_v > 0.0 {
            let impact = visual::maneuver_impact(
                delta_v,
                satellite.map(|s| s.altitude_km),
                risk.probability,
                outcome.simulated_probability,
            );
            lines.push(Line::from(Span::styled("MANEUVER IMPACT", Style::default().fg(self.theme.muted))));
            lines.push(Line::from(vec![
                Span::raw("FUEL CONSUMPTION "),
                Span::styled(format!("-{:.1}%", impact.fuel_consumed_pct), Style::default().fg(self.theme.alert)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("NEW ALTITUDE     "),
                Span::styled(format!("{:.1} km", impact.new_altitude_km), Style::default().fg(self.theme.accent)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("RISK REDUCTION   "),
                Span::styled(format!("-{:.1}%", impact.risk_reduction_pct), Style::default().fg(self.theme.accent)),
            ]));
        }
        let verdict_color = if outcome.is_safe { self.theme.accent } else { self.theme.alert };
        lines.push(Line::from(vec![
            Span::styled("PROJECTED RISK ", Style::default().fg(self.theme.muted)),
            Span::styled(
                format!("{:.1}%", outcome.probability_pct()),
                Style::default().fg(verdict_color).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(outcome.verdict(), Style::default().fg(verdict_color))));

        let details = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(details, rows[next]);
    }

    fn render_alerts(&self, frame: &mut Frame, area: Rect) {
        let live = if self.blink_on { "LIVE" } else { "    " };
        let block = styled_block("ALERT CENTER", &self.theme)
            .title(Line::from(Span::styled(format!(" {} ", live), Style::default().fg(self.theme.alert))).alignment(Alignment::Right));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut y = inner.y;
        for alert in by_severity(&self.console.catalog.alerts) {
            if y + 2 > inner.y + inner.height {
                break;
            }
            let row = Rect::new(inner.x, y, inner.width, 2);
            frame.render_widget(AlertIndicator::new(alert).blink(self.blink_on), row);
            y += 3;
        }
    }

    fn render_fuel(&self, frame: &mut Frame, area: Rect) {
        let block = styled_block("FUEL STATUS", &self.theme);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height < 2 {
            return;
        }

        let satellites = &self.console.catalog.satellites;
        let average = fleet_average_fuel(satellites)
            .map(|avg| format!("{:.0}%", avg))
            .unwrap_or_else(|| "--".to_string());
        let summary = Paragraph::new(vec![
            Line::from(Span::styled(average, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled("FLEET AVERAGE", Style::default().fg(self.theme.muted))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(summary, Rect::new(inner.x, inner.y, inner.width, 2));

        let mut y = inner.y + 3;
        for sat in satellites {
            if y + 2 > inner.y + inner.height {
                break;
            }
            let bar = LevelBar::new(&sat.name, sat.fuel_pct, 100.0)
                .color(satellite_status_color(&sat.status))
                .warning_below(Satellite::FLEET_FUEL_WARNING_PCT)
                .danger_below(Satellite::LOW_FUEL_PCT);
            frame.render_widget(bar, Rect::new(inner.x, y, inner.width, 2));
            y += 2;
        }
    }

    fn render_assets(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(area);

        let objects = &self.console.catalog.tracked_objects;
        let header = Row::new(vec!["DESIGNATION", "NORAD", "COUNTRY", "ORBIT", "STATUS"])
            .style(Style::default().fg(self.theme.muted).add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = objects
            .iter()
            .map(|obj| {
                let status_color = if obj.is_operational() { self.theme.accent } else { self.theme.alert };
                Row::new(vec![
                    Cell::from(obj.designation.clone()),
                    Cell::from(obj.norad_id.to_string()),
                    Cell::from(obj.country.clone()),
                    Cell::from(obj.orbit.clone()),
                    Cell::from(Span::styled(obj.status.to_uppercase(), Style::default().fg(status_color))),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Length(7),
                Constraint::Length(14),
                Constraint::Length(6),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .column_spacing(1)
        .block(styled_block(&format!("SATELLITE CATALOG ── {} ASSETS", objects.len()), &self.theme));
        frame.render_widget(table, chunks[0]);

        let items: Vec<ListItem> = self
            .console
            .catalog
            .ground_stations
            .iter()
            .map(|station| {
                let mut lines = vec![Line::from(vec![
                    Span::styled(format!("{:<16}", station.name.to_uppercase()), Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled("● ", Style::default().fg(station_status_color(&station.status))),
                    Span::raw(station.status.to_string()),
                ])];
                let mut detail = vec![Span::styled(station.location.to_uppercase(), Style::default().fg(self.theme.muted))];
                if let Some(contact) = &station.contact {
                    detail.push(Span::styled(format!("  LINK: {}", contact), Style::default().fg(self.theme.accent)));
                }
                lines.push(Line::from(detail));
                ListItem::new(lines)
            })
            .collect();
        let list = List::new(items)
            .block(styled_block("GROUND STATIONS ── NETWORK", &self.theme))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[1], &mut self.station_state);
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("{} VIEW", self.current_screen.title()),
                Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("SYSTEM MODULE UNDER CONSTRUCTION", Style::default().fg(self.theme.muted))),
        ];
        let placeholder = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(styled_block(&format!("{} MODULE", self.current_screen.title()), &self.theme));
        frame.render_widget(placeholder, area);
    }

    fn render_logs(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let visible = chunks[0].height.saturating_sub(2) as usize;
        let start = self.console.message_log.len().saturating_sub(visible);
        let events: Vec<Line> = self.console.message_log[start..]
            .iter()
            .map(|msg| {
                let style = if msg.severity == Severity::Critical {
                    Style::default().fg(severity_color(&msg.severity)).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(severity_color(&msg.severity))
                };
                Line::from(vec![
                    Span::styled(msg.timestamp.format("%H:%M:%S ").to_string(), Style::default().fg(self.theme.muted)),
                    Span::styled(format!("[{}] {}", msg.source.to_uppercase(), msg.message), style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(events).block(styled_block("EVENTS", &self.theme)), chunks[0]);

        let visible = chunks[1].height.saturating_sub(2) as usize;
        let start = self.system_log.len().saturating_sub(visible);
        let system: Vec<Line> = self
            .system_log
            .iter()
            .skip(start)
            .map(|line| Line::from(Span::styled(line.as_str(), Style::default().fg(self.theme.muted))))
            .collect();
        frame.render_widget(Paragraph::new(system).block(styled_block("SYSTEM LOG", &self.theme)), chunks[1]);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status_text = format!(" {} | Press ? for help ", self.console.check_status());
        let status = Paragraph::new(status_text)
            .style(Style::default().fg(self.theme.fg).bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_diagnostics(&self, frame: &mut Frame) {
        let Some(sat) = self.console.current_satellite() else {
            return;
        };
        let popup_area = centered_rect(44, 12, frame.area());
        frame.render_widget(Clear, popup_area);

        let status_color = if sat.status.is_nominal() { self.theme.accent } else { self.theme.alert };
        let field = |label: &str, value: String, color: Color| {
            Line::from(vec![
                Span::styled(format!("{:<10}", label), Style::default().fg(self.theme.muted)),
                Span::styled(value, Style::default().fg(color)),
            ])
        };
        let text = vec![
            Line::from(Span::styled(sat.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(format!("ID: {}", sat.id), Style::default().fg(self.theme.muted))),
            Line::from(""),
            field("STATUS", sat.status.to_string(), status_color),
            field("ORBIT", sat.orbit.to_string(), self.theme.fg),
            field("ALTITUDE", format!("{:.0} km", sat.altitude_km), self.theme.fg),
            field("FUEL", format!("{:.0}%", sat.fuel_pct), self.theme.fg),
            Line::from(""),
            Line::from(Span::styled("[Esc] CLOSE DIAGNOSTICS", Style::default().fg(self.theme.muted))),
        ];
        let popup = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.accent))
                .title(" SATELLITE DIAGNOSTICS "),
        );
        frame.render_widget(popup, popup_area);
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered_rect(67, 26, frame.area());
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.accent)));
        frame.render_widget(help, popup_area);
    }
}

fn to_chrono(duration: Duration) -> ChronoDuration {
    ChronoDuration::from_std(duration).unwrap_or_else(|_| ChronoDuration::seconds(1))
}

/// Point on an ellipse with semi-axes `a` and `a * squash`
fn ellipse(a: f64, squash: f64, theta: f64) -> (f64, f64) {
    (a * theta.cos(), a * squash * theta.sin())
}

fn rotate((x, y): (f64, f64), angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}
