use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use vendor_registry::client::{FetchError, VendorApi};
use vendor_registry::vendor::Vendor;
use vendor_registry::views::{
    Dashboard, FetchTicket, FormField, LoadState, Notification, VendorForm, VendorListView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Vendors,
    AddVendor,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Dashboard => Page::Vendors,
            Page::Vendors => Page::AddVendor,
            Page::AddVendor => Page::Dashboard,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Dashboard => Page::AddVendor,
            Page::Vendors => Page::Dashboard,
            Page::AddVendor => Page::Vendors,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Vendors => "Vendors",
            Page::AddVendor => "Add Vendor",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchTarget {
    Dashboard,
    Vendors,
}

/// Results coming back from background API calls.
enum Done {
    Fetch {
        target: FetchTarget,
        ticket: FetchTicket,
        result: Result<Vec<Vendor>, FetchError>,
    },
    Submit(Result<Vendor, FetchError>),
}

pub struct App {
    api: Arc<dyn VendorApi + Send + Sync>,
    pub current_page: Page,
    pub dashboard: Dashboard,
    pub list: VendorListView,
    pub form: VendorForm,
    pub editing_search: bool,
    done_tx: Sender<Done>,
    done_rx: Receiver<Done>,
}

impl App {
    pub fn new(api: Arc<dyn VendorApi + Send + Sync>, page_size: usize) -> Self {
        let (done_tx, done_rx) = mpsc::channel();

        Self {
            api,
            current_page: Page::Dashboard,
            dashboard: Dashboard::new(),
            list: VendorListView::new(page_size),
            form: VendorForm::new(),
            editing_search: false,
            done_tx,
            done_rx,
        }
    }

    /// Run `call` against the API off the UI thread; the result comes back
    /// through the channel.
    fn spawn_call<F>(&self, call: F)
    where
        F: FnOnce(&dyn VendorApi) -> Done + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let tx = self.done_tx.clone();
        thread::spawn(move || {
            let done = call(&*api);
            // Receiver gone means the UI already exited.
            let _ = tx.send(done);
        });
    }

    /// Kick off a background list fetch for one view.
    fn start_fetch(&mut self, target: FetchTarget) {
        let ticket = match target {
            FetchTarget::Dashboard => self.dashboard.begin_fetch(),
            FetchTarget::Vendors => self.list.begin_fetch(),
        };

        self.spawn_call(move |api| Done::Fetch {
            target,
            ticket,
            result: api.list_vendors(),
        });
    }

    fn start_submit(&mut self) {
        let Some(payload) = self.form.begin_submit() else {
            return;
        };

        self.spawn_call(move |api| Done::Submit(api.add_vendor(&payload)));
    }

    fn apply(&mut self, done: Done) {
        match done {
            Done::Fetch {
                target: FetchTarget::Dashboard,
                ticket,
                result,
            } => {
                self.dashboard.finish_fetch(ticket, result);
            }
            Done::Fetch {
                target: FetchTarget::Vendors,
                ticket,
                result,
            } => {
                self.list.finish_fetch(ticket, result);
            }
            Done::Submit(result) => {
                if self.form.finish_submit(result).is_some() {
                    // Both listings are now out of date.
                    self.start_fetch(FetchTarget::Dashboard);
                    self.start_fetch(FetchTarget::Vendors);
                }
            }
        }
    }

    /// Apply finished calls; stale fetches are dropped by the views.
    fn drain_results(&mut self) {
        while let Ok(done) = self.done_rx.try_recv() {
            self.apply(done);
        }
    }

    fn refresh_current(&mut self) {
        match self.current_page {
            Page::Dashboard => self.start_fetch(FetchTarget::Dashboard),
            Page::Vendors => self.start_fetch(FetchTarget::Vendors),
            Page::AddVendor => {}
        }
    }

    fn search_term(&self) -> &str {
        match self.current_page {
            Page::Dashboard => self.dashboard.search_term(),
            _ => self.list.search_term(),
        }
    }

    fn edit_search(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc => self.editing_search = false,
            KeyCode::Backspace => match self.current_page {
                Page::Dashboard => {
                    let mut term = self.dashboard.search_term().to_string();
                    term.pop();
                    self.dashboard.set_search_term(term);
                }
                _ => self.list.pop_search_char(),
            },
            KeyCode::Char(c) => match self.current_page {
                Page::Dashboard => {
                    let term = format!("{}{}", self.dashboard.search_term(), c);
                    self.dashboard.set_search_term(term);
                }
                _ => self.list.push_search_char(c),
            },
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyCode) {
        match key {
            // Leave the form; its contents stay for when the user comes back.
            KeyCode::Esc => self.switch_page(Page::Dashboard),
            KeyCode::Up => self.form.focus_previous(),
            KeyCode::Down => self.form.focus_next(),
            KeyCode::Left => self.form.cycle_option(false),
            KeyCode::Right => self.form.cycle_option(true),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Enter => self.start_submit(),
            KeyCode::Char(c) => self.form.input_char(c),
            _ => {}
        }
    }

    /// Returns `false` when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        if self.editing_search {
            self.edit_search(key.code);
            return true;
        }

        match key.code {
            KeyCode::Tab => self.switch_page(self.current_page.next()),
            KeyCode::BackTab => self.switch_page(self.current_page.previous()),
            _ if self.current_page == Page::AddVendor => self.handle_form_key(key.code),
            KeyCode::Esc | KeyCode::Char('q') => return false,
            KeyCode::Char('r') => self.refresh_current(),
            KeyCode::Char('/') => self.editing_search = true,
            KeyCode::Right | KeyCode::Char('n') if self.current_page == Page::Vendors => {
                self.list.next_page();
            }
            KeyCode::Left | KeyCode::Char('p') if self.current_page == Page::Vendors => {
                self.list.previous_page();
            }
            _ => {}
        }
        true
    }

    fn switch_page(&mut self, page: Page) {
        self.current_page = page;
        self.editing_search = false;
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Each view fetches on mount
    app.start_fetch(FetchTarget::Dashboard);
    app.start_fetch(FetchTarget::Vendors);

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal UI failed");
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        app.drain_results();
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if !app.handle_key(key) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Dashboard => render_dashboard(f, chunks[1], app),
        Page::Vendors => render_vendor_list(f, chunks[1], app),
        Page::AddVendor => render_form(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::Dashboard, Page::Vendors, Page::AddVendor];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Vendor Registry "),
    );

    f.render_widget(header, area);
}

/// Loading / error placeholder. Returns `true` when it drew something.
fn render_load_state<T>(f: &mut Frame, area: Rect, state: &LoadState<T>) -> bool {
    let (text, color) = match state {
        LoadState::Loading => ("Loading vendors...".to_string(), Color::Cyan),
        LoadState::Failed(msg) => (format!("{msg}  (press r to retry)"), Color::Red),
        LoadState::Loaded(_) => return false,
    };

    let p = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
    true
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &App) {
    if render_load_state(f, area, app.dashboard.load_state()) {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Counters
            Constraint::Length(10), // Charts
            Constraint::Length(3),  // Search
            Constraint::Min(0),     // Table
        ])
        .split(area);

    let summary = app.dashboard.summary();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(rows[0]);

    let counters = [
        ("Total Vendors", summary.total, Color::Blue),
        ("Active Vendors", summary.active, Color::Green),
        ("Critical Vendors", summary.critical, Color::Red),
        ("Pending Vendors", summary.pending, Color::Yellow),
    ];
    for (i, (title, value, color)) in counters.iter().enumerate() {
        let card = Paragraph::new(Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title(*title));
        f.render_widget(card, cards[i]);
    }

    let charts = app.dashboard.charts();
    let chart_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(33), Constraint::Percentage(33)])
        .split(rows[1]);

    for (i, (title, series)) in [
        (" Vendor Types ", &charts.by_type),
        (" Vendor Criticality ", &charts.by_criticality),
        (" Vendor Status ", &charts.by_status),
    ]
    .iter()
    .enumerate()
    {
        let data: Vec<(&str, u64)> = series
            .iter()
            .map(|(label, n)| (label.as_str(), *n as u64))
            .collect();
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title(*title))
            .data(data.as_slice())
            .bar_width(6)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
        f.render_widget(chart, chart_areas[i]);
    }

    render_search_box(f, rows[2], app);
    render_vendor_table(f, rows[3], &app.dashboard.table(), " Vendors ");
}

fn render_vendor_list(f: &mut Frame, area: Rect, app: &App) {
    if render_load_state(f, area, app.list.load_state()) {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Pagination
        ])
        .split(area);

    render_search_box(f, rows[0], app);

    let title = format!(" Vendors ({} found) ", app.list.filtered_count());
    render_vendor_table(f, rows[1], &app.list.current_page_items(), &title);

    let enabled = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(Color::DarkGray);

    let pager = Line::from(vec![
        Span::styled(
            "◀ Previous",
            if app.list.can_go_previous() { enabled } else { disabled },
        ),
        Span::raw(format!(
            "   Page {} of {}   ",
            app.list.current_page(),
            app.list.total_pages().max(1)
        )),
        Span::styled("Next ▶", if app.list.can_go_next() { enabled } else { disabled }),
    ]);
    f.render_widget(
        Paragraph::new(pager).block(Block::default().borders(Borders::ALL)),
        rows[2],
    );
}

fn render_search_box(f: &mut Frame, area: Rect, app: &App) {
    let style = if app.editing_search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if app.editing_search { "▏" } else { "" };

    let search = Paragraph::new(format!("🔍 {}{}", app.search_term(), cursor))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Search (name, type, email) "));
    f.render_widget(search, area);
}

fn render_vendor_table(f: &mut Frame, area: Rect, vendors: &[&Vendor], title: &str) {
    let header_cells = ["Name", "Type", "Criticality", "Status", "Email", "Service"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = vendors.iter().map(|v| {
        let cells = vec![
            Cell::from(truncate(&v.name, 28)),
            Cell::from(v.vendor_type.clone()),
            Cell::from(v.criticality.clone())
                .style(Style::default().fg(criticality_color(&v.criticality))),
            Cell::from(v.status.clone()).style(Style::default().fg(status_color(&v.status))),
            Cell::from(truncate(&v.email, 30)),
            Cell::from(v.service_provided.clone()),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(30),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(32),
            Constraint::Length(20),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title.to_string()),
    );

    f.render_widget(table, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    for field in FormField::ALL {
        let focused = app.form.focused() == field;
        let marker = if focused { "→ " } else { "  " };
        let value = app.form.value(field);
        let shown = if value.is_empty() && !field.is_text() {
            "(select with ←/→)".to_string()
        } else {
            value
        };

        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<18}", field.label()), label_style),
            Span::styled(shown, Style::default().fg(Color::White)),
        ]));

        if let Some(msg) = app.form.error_for(field) {
            lines.push(Line::from(Span::styled(
                format!("    {msg}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    if app.form.is_submitting() {
        lines.push(Line::from(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Cyan),
        )));
    }
    match app.form.notification() {
        Some(Notification::Success(msg)) => {
            lines.push(Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Green))))
        }
        Some(Notification::Failure(msg)) => {
            lines.push(Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))))
        }
        None => {}
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Add New Vendor "),
    );
    f.render_widget(form, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let keys: &[(&str, &str)] = match (app.current_page, app.editing_search) {
        (_, true) => &[("type", "Search"), ("Enter/Esc", "Done")],
        (Page::Dashboard, false) => &[("Tab", "Page"), ("/", "Search"), ("r", "Reload"), ("q", "Quit")],
        (Page::Vendors, false) => &[
            ("Tab", "Page"),
            ("/", "Search"),
            ("←/→", "Prev/Next"),
            ("r", "Reload"),
            ("q", "Quit"),
        ],
        (Page::AddVendor, false) => &[
            ("Tab", "Page"),
            ("↑/↓", "Field"),
            ("←/→", "Option"),
            ("Enter", "Submit"),
            ("Esc", "Back"),
        ],
    };

    let mut status_spans = vec![];
    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            status_spans.push(Span::raw(" | "));
        }
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(format!(" {action}")));
    }

    let status = Paragraph::new(Line::from(status_spans))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn criticality_color(criticality: &str) -> Color {
    match criticality.to_lowercase().as_str() {
        "low" => Color::Green,
        "medium" => Color::Yellow,
        "high" => Color::LightRed,
        "critical" => Color::Red,
        _ => Color::Gray,
    }
}

fn status_color(status: &str) -> Color {
    match status.to_lowercase().as_str() {
        "active" => Color::Green,
        "inactive" => Color::Gray,
        "pending" => Color::Blue,
        "under review" => Color::Yellow,
        _ => Color::Gray,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
