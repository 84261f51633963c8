use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::{debug, info};

use orbitron_core::{
    catalog,
    config::AppConfig,
    energy::CosmicEnergy,
    models::EraId,
    sim::{SimState, TRAVEL_COST, WISH_COST},
};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_WISH_LEN: usize = 72;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    accent_alt: Color,
    muted: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Magenta,
            accent_alt: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Wishes,
    Travel,
    Planets,
    Discoveries,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Wishes, Tab::Travel, Tab::Planets, Tab::Discoveries];

    fn title(self) -> &'static str {
        match self {
            Tab::Wishes => "★ Wishes",
            Tab::Travel => "◷ Travel",
            Tab::Planets => "◍ Planets",
            Tab::Discoveries => "◎ Discoveries",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Single-line editor for the wish draft.
#[derive(Debug, Clone, Default)]
struct WishInput {
    input: String,
    cursor: usize,
}

impl WishInput {
    fn move_cursor(&mut self, delta: isize) {
        let len = self.input.len() as isize;
        let mut next = self.cursor as isize + delta;
        if next < 0 {
            next = 0;
        } else if next > len {
            next = len;
        }
        self.cursor = next as usize;
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    fn insert(&mut self, ch: char) {
        if self.input.len() >= MAX_WISH_LEN {
            return;
        }
        if ch.is_ascii() && !ch.is_ascii_control() {
            self.input.insert(self.cursor, ch);
            self.cursor += ch.len_utf8();
        }
    }

    fn backspace(&mut self) {
        if self.cursor > 0 && self.cursor <= self.input.len() {
            self.cursor -= 1;
            self.input.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn value(&self) -> &str {
        &self.input
    }
}

enum AppEvent {
    Input(Event),
    Tick,
    Regen,
    Reward { amount: u8 },
}

/// High-level application state for the Orbitron TUI.
pub struct OrbitronApp {
    config: AppConfig,
    rng: StdRng,
    state: SimState,
    tab: Tab,
    era_cursor: usize,
    planet_cursor: usize,
    input: WishInput,
    status: String,
    should_quit: bool,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    reward_tasks: Vec<JoinHandle<()>>,
    theme: Theme,
}

impl OrbitronApp {
    pub fn new(config: AppConfig, rng: StdRng) -> Self {
        let state = SimState::new(CosmicEnergy::new(config.starting_energy));
        let era_cursor = EraId::ALL
            .iter()
            .position(|era| *era == state.selected_era())
            .unwrap_or(0);
        Self {
            config,
            rng,
            state,
            tab: Tab::Wishes,
            era_cursor,
            planet_cursor: 0,
            input: WishInput::default(),
            status: "Type a wish and press Enter".to_string(),
            should_quit: false,
            event_tx: None,
            reward_tasks: Vec::new(),
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        let regen_task = spawn_regen_task(event_tx.clone(), self.config.regen_interval_secs);
        self.event_tx = Some(event_tx);
        info!(
            regen_interval_secs = self.config.regen_interval_secs,
            "regeneration timer started"
        );

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }

            if self.should_quit {
                break;
            }
        }

        // Recurring and one-shot timers die with the view.
        regen_task.abort();
        for task in self.reward_tasks.drain(..) {
            task.abort();
        }
        info!("timers cancelled");

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                self.handle_input(event);
                true
            }
            Some(AppEvent::Tick) => {
                self.reward_tasks.retain(|task| !task.is_finished());
                true
            }
            Some(AppEvent::Regen) => {
                self.state.regen_tick();
                true
            }
            Some(AppEvent::Reward { amount }) => {
                self.state.apply_reward(amount);
                self.status = format!("A granted wish returned +{amount} energy");
                true
            }
            None => false,
        }
    }

    fn handle_input(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if self.handle_global_shortcut(&key) {
            return;
        }
        match self.tab {
            Tab::Wishes => self.handle_wishes_key(key),
            Tab::Travel => self.handle_travel_key(key),
            Tab::Planets => self.handle_planets_key(key),
            Tab::Discoveries => self.handle_catalog_key(key),
        }
    }

    fn handle_global_shortcut(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers == KeyModifiers::CONTROL {
            if let KeyCode::Char('c') = key.code {
                self.should_quit = true;
                return true;
            }
        }
        match key.code {
            KeyCode::Tab => {
                self.tab = self.tab.next();
                true
            }
            KeyCode::BackTab => {
                self.tab = self.tab.prev();
                true
            }
            KeyCode::Esc => {
                self.should_quit = true;
                true
            }
            _ => false,
        }
    }

    fn handle_wishes_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_wish(),
            KeyCode::Left => self.input.move_cursor(-1),
            KeyCode::Right => self.input.move_cursor(1),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Char(ch) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    self.input.insert(ch);
                }
            }
            _ => {}
        }
    }

    fn handle_travel_key(&mut self, key: KeyEvent) {
        let eras = EraId::ALL.len();
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.should_quit = true,
            KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
                self.era_cursor = self.era_cursor.saturating_sub(1);
            }
            KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
                self.era_cursor = (self.era_cursor + 1).min(eras - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let era = EraId::ALL[self.era_cursor];
                self.state.travel_to(era);
                let period = catalog::time_period(era);
                self.status = format!("Traveled to {} (-{TRAVEL_COST} energy)", period.name);
            }
            _ => {}
        }
    }

    fn handle_planets_key(&mut self, key: KeyEvent) {
        let planets = catalog::planets().len();
        match key.code {
            KeyCode::Char('q') if key.modifiers.is_empty() => self.should_quit = true,
            KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
                self.planet_cursor = self.planet_cursor.saturating_sub(1);
            }
            KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
                self.planet_cursor = (self.planet_cursor + 1).min(planets.saturating_sub(1));
            }
            _ => {}
        }
    }

    fn handle_catalog_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char('q') = key.code {
            if key.modifiers.is_empty() {
                self.should_quit = true;
            }
        }
    }

    fn submit_wish(&mut self) {
        let text = self.input.value().to_string();
        match self.state.submit_wish(&text, &mut self.rng) {
            Ok(outcome) => {
                self.input.clear();
                if outcome.granted {
                    self.status = format!("Wish granted! +{} energy inbound", outcome.reward);
                    self.schedule_reward(outcome.reward);
                } else {
                    self.status = "The cosmos stays silent this time".to_string();
                }
            }
            Err(rejection) => {
                // Invalid submissions are silent no-ops beyond the status line.
                debug!(%rejection, "wish submission refused");
                self.status = rejection.to_string();
            }
        }
    }

    fn schedule_reward(&mut self, amount: u8) {
        let Some(sender) = self.event_tx.clone() else {
            return;
        };
        let delay = Duration::from_secs(self.config.reward_delay_secs);
        let task = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = sender.send(AppEvent::Reward { amount }).await;
        });
        self.reward_tasks.push(task);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_header(frame, rows[0]);
        self.render_energy(frame, rows[1]);
        self.render_tabs(frame, rows[2]);
        match self.tab {
            Tab::Wishes => self.render_wishes(frame, rows[3]),
            Tab::Travel => self.render_travel(frame, rows[3]),
            Tab::Planets => self.render_planets(frame, rows[3]),
            Tab::Discoveries => self.render_discoveries(frame, rows[3]),
        }
        self.render_status(frame, rows[4]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "⚡ ORBITRON · TIME TRAVEL SIMULATOR",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Travel through eras, survey planets, make wishes",
                Style::default().fg(self.theme.muted),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(header, area);
    }

    fn render_energy(&self, frame: &mut Frame, area: Rect) {
        let value = self.state.energy().value();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(26), Constraint::Min(10)])
            .split(area);

        let gauge_color = if value < WISH_COST {
            self.theme.danger
        } else if value < 30 {
            self.theme.warning
        } else {
            self.theme.accent_alt
        };

        let label = Paragraph::new(Line::from(vec![
            Span::styled("⚡ Cosmic energy: ", Style::default().fg(self.theme.primary_fg)),
            Span::styled(
                format!("{value}%"),
                Style::default()
                    .fg(gauge_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        frame.render_widget(label, chunks[0]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(gauge_color))
            .percent(u16::from(value));
        frame.render_widget(gauge, chunks[1]);
    }

    fn render_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.title())).collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(self.theme.muted))
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .select(self.tab.index());
        frame.render_widget(tabs, area);
    }

    fn render_wishes(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let affordable = self.state.energy().can_afford(WISH_COST);
        let input_title = if affordable {
            format!("Make a Wish (-{WISH_COST} energy, Enter to submit)")
        } else {
            format!("Make a Wish (need {WISH_COST} energy)")
        };
        let border_color = if affordable {
            self.theme.accent
        } else {
            self.theme.danger
        };
        let input_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(self.input.value().to_string()),
        ]);
        let input = Paragraph::new(input_line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(input_title),
        );
        frame.render_widget(input, chunks[0]);

        let cursor_x = (chunks[0].x + 3 + self.input.cursor as u16)
            .min(chunks[0].x + chunks[0].width.saturating_sub(2));
        frame.set_cursor(cursor_x, chunks[0].y + 1);

        let visible = chunks[1].height.saturating_sub(2) as usize;
        let items: Vec<ListItem> = if self.state.wishes().is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "  No wishes yet",
                Style::default().fg(self.theme.muted),
            )))]
        } else {
            self.state
                .wishes()
                .iter()
                .take(visible.max(1))
                .map(|wish| {
                    let (badge, color) = if wish.granted {
                        ("✔ granted", self.theme.success)
                    } else {
                        ("✘ pending", self.theme.danger)
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{badge:<10}"),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            wish.text.clone(),
                            Style::default().fg(self.theme.primary_fg),
                        ),
                        Span::styled(
                            format!("  +{}", wish.energy),
                            Style::default().fg(self.theme.muted),
                        ),
                    ]))
                })
                .collect()
        };
        let ledger = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Wish Ledger ({})", self.state.wishes().len())),
        );
        frame.render_widget(ledger, chunks[1]);
    }

    fn render_travel(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        for (idx, period) in catalog::time_periods().iter().enumerate() {
            let is_current = self.state.selected_era() == period.id;
            let is_cursor = self.era_cursor == idx;
            let border_color = if is_cursor {
                self.theme.accent
            } else if is_current {
                self.theme.accent_alt
            } else {
                self.theme.muted
            };
            let marker = if is_cursor { "▶ " } else { "  " };
            let title = format!("{marker}{} {}", period.icon, period.name);

            let mut lines = vec![
                Line::from(Span::styled(
                    period.description,
                    Style::default().fg(self.theme.muted),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("{} discoveries available", period.discoveries),
                    Style::default().fg(self.theme.accent_alt),
                )),
                Line::from(Span::styled(
                    format!("Enter travels here (-{TRAVEL_COST} energy)"),
                    Style::default().fg(self.theme.muted),
                )),
            ];
            if is_current {
                lines.push(Line::from(Span::styled(
                    "● you are here",
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD),
                )));
            }

            let card = Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color))
                        .title(title),
                )
                .wrap(Wrap { trim: true });
            frame.render_widget(card, columns[idx]);
        }
    }

    fn render_planets(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ])
            .split(area);

        for (idx, planet) in catalog::planets().iter().enumerate() {
            let is_cursor = self.planet_cursor == idx;
            let border_color = if is_cursor {
                self.theme.accent
            } else {
                self.theme.muted
            };
            let card = Paragraph::new(vec![
                Line::from(Span::styled(
                    planet.kind,
                    Style::default().fg(self.theme.muted),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Resources: ", Style::default().fg(self.theme.muted)),
                    Span::styled(
                        planet.resources,
                        Style::default().fg(self.theme.primary_fg),
                    ),
                ]),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border_color))
                    .title(format!("{} {}", planet.icon, planet.name)),
            )
            .wrap(Wrap { trim: true });
            frame.render_widget(card, columns[idx]);
        }
    }

    fn render_discoveries(&self, frame: &mut Frame, area: Rect) {
        let discoveries = catalog::discoveries();
        let mut constraints: Vec<Constraint> =
            discoveries.iter().map(|_| Constraint::Length(6)).collect();
        constraints.push(Constraint::Min(0));
        let cards = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        for (idx, discovery) in discoveries.iter().enumerate() {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.muted))
                .title(format!("⚛ {}", discovery.name));
            let inner = block.inner(cards[idx]);
            frame.render_widget(block, cards[idx]);

            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(2), Constraint::Length(1)])
                .split(inner);

            let era = catalog::time_period(discovery.era);
            let body = Paragraph::new(vec![
                Line::from(vec![
                    Span::styled("era: ", Style::default().fg(self.theme.muted)),
                    Span::styled(
                        era.name,
                        Style::default().fg(self.theme.accent_alt),
                    ),
                ]),
                Line::from(Span::styled(
                    discovery.description,
                    Style::default().fg(self.theme.primary_fg),
                )),
            ])
            .wrap(Wrap { trim: true });
            frame.render_widget(body, parts[0]);

            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(self.theme.accent))
                .label(format!("impact on reality {}%", discovery.impact))
                .percent(u16::from(discovery.impact.min(100)));
            frame.render_widget(gauge, parts[1]);
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let hint = match self.tab {
            Tab::Wishes => "Tab switch · Enter submit · Esc quit",
            Tab::Travel => "Tab switch · ←/→ choose era · Enter travel · q quit",
            Tab::Planets => "Tab switch · ←/→ browse · q quit",
            Tab::Discoveries => "Tab switch · q quit",
        };
        let status = Paragraph::new(Line::from(vec![
            Span::styled(
                self.status.clone(),
                Style::default().fg(self.theme.primary_fg),
            ),
            Span::styled(
                format!("   {hint}"),
                Style::default().fg(self.theme.muted),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Status"));
        frame.render_widget(status, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

fn spawn_regen_task(sender: mpsc::Sender<AppEvent>, interval_secs: u64) -> JoinHandle<()> {
    let period = Duration::from_secs(interval_secs.max(1));
    tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;
            if sender.send(AppEvent::Regen).await.is_err() {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_cycle_in_both_directions() {
        assert_eq!(Tab::Wishes.next(), Tab::Travel);
        assert_eq!(Tab::Discoveries.next(), Tab::Wishes);
        assert_eq!(Tab::Wishes.prev(), Tab::Discoveries);
    }

    #[test]
    fn wish_input_edits_around_the_cursor() {
        let mut input = WishInput::default();
        for ch in "a ship".chars() {
            input.insert(ch);
        }
        input.move_home();
        input.delete();
        input.insert('A');
        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "A shi");

        input.clear();
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn wish_input_caps_length() {
        let mut input = WishInput::default();
        for _ in 0..(MAX_WISH_LEN + 10) {
            input.insert('x');
        }
        assert_eq!(input.value().len(), MAX_WISH_LEN);
    }
}
