//! User interface rendering of the race.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::{Marker, DOT},
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::{
    layout::{NodeKind, Position},
    traversal::Strategy,
    App,
};

/// Key bindings shown in the status bar border.
const KEY_HELP: &str = "(q) quit / (r) restart / (a) abandon / (space) pause / (v) view";

/// Color of the cells a search has explored.
const fn trail_color(strategy: Strategy) -> Color {
    match strategy {
        Strategy::DepthFirst => Color::Blue,
        Strategy::BreadthFirst => Color::Yellow,
    }
}

/// Color of the cell a search currently occupies.
const fn cursor_color(strategy: Strategy) -> Color {
    match strategy {
        Strategy::DepthFirst => Color::LightCyan,
        Strategy::BreadthFirst => Color::LightYellow,
    }
}

/// Renders the race: the maze with both searches on top and a status bar below.
///
/// # Errors
///
/// This function may return errors if the layout cannot be split as requested.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(4), // Status bar
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let status_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    let grid = app.race.grid();
    let space = centered(maze_content_area, grid.cols(), grid.rows())?;

    race_canvas(app, frame, space);
    status_bar(app, frame, status_area);

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Returns a `width × height` rectangle centred in `area`, shrunk to fit if needed.
///
/// # Errors
///
/// This function may return errors if the layout cannot be split as requested.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Result<Rect> {
    let row = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .split(area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze row from vertical layout")?;

    Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .split(row)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")
}

/// Projects a world position onto the canvas plane, with rows growing downwards.
pub(crate) fn to_screen(position: Position) -> (f64, f64) {
    (position.x, -position.z)
}

/// Screen coordinates of the explored cells and of the cursor of one search.
pub(crate) fn search_points(app: &App, strategy: Strategy) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let layout = app.race.layout();
    let trail = app
        .race
        .explored(strategy)
        .iter()
        .filter_map(|id| layout.node(*id))
        .map(|placement| to_screen(placement.position))
        .collect();
    let cursor = app
        .race
        .head(strategy)
        .and_then(|id| layout.cursor(id))
        .map(to_screen)
        .into_iter()
        .collect();

    (trail, cursor)
}

/// Renders the maze and the visible searches on a [`Canvas`].
///
/// Layers are painted from the bottom up: walls, plain cells, junctions, the trail and cursor of
/// every visible search and finally the two terminals.
pub(crate) fn race_canvas(app: &App, frame: &mut Frame, space: Rect) {
    if space.is_empty() {
        return;
    }
    let layout = app.race.layout();
    let cell_size = layout.cell_size();

    let walls: Vec<(f64, f64)> = layout.walls().iter().copied().map(to_screen).collect();
    let nodes_of = |kind: NodeKind| -> Vec<(f64, f64)> {
        layout
            .nodes()
            .iter()
            .filter(|placement| placement.kind == kind)
            .map(|placement| to_screen(placement.position))
            .collect()
    };
    let corridors = nodes_of(NodeKind::Corridor);
    let junctions = nodes_of(NodeKind::Junction);
    let starts = nodes_of(NodeKind::Start);
    let goals = nodes_of(NodeKind::Goal);

    let searches: Vec<(Strategy, Vec<(f64, f64)>, Vec<(f64, f64)>)> =
        [Strategy::BreadthFirst, Strategy::DepthFirst]
            .into_iter()
            .filter(|strategy| app.view.shows(*strategy))
            .map(|strategy| {
                let (trail, cursor) = search_points(app, strategy);
                (strategy, trail, cursor)
            })
            .collect();

    let half_width = f64::from(rounded_div::i32(space.width.into(), 2)) * cell_size;
    let half_height = f64::from(rounded_div::i32(space.height.into(), 2)) * cell_size;

    let maze = Canvas::default()
        .x_bounds([-half_width, half_width])
        .y_bounds([-half_height, half_height])
        .marker(Marker::Dot)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &walls,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &corridors,
                color: Color::DarkGray,
            });
            ctx.draw(&Points {
                coords: &junctions,
                color: Color::Red,
            });
            for (strategy, trail, cursor) in &searches {
                ctx.draw(&Points {
                    coords: trail,
                    color: trail_color(*strategy),
                });
                ctx.draw(&Points {
                    coords: cursor,
                    color: cursor_color(*strategy),
                });
            }
            ctx.draw(&Points {
                coords: &starts,
                color: Color::White,
            });
            ctx.draw(&Points {
                coords: &goals,
                color: Color::Magenta,
            });
        });

    frame.render_widget(maze, space);
}

/// Text of the status bar: round and tick counters, both searches and any notice.
pub(crate) fn status_lines(app: &App) -> Vec<Line<'static>> {
    let race = &app.race;

    let mut header = vec![
        format!("round {}", race.round()),
        format!("tick {}", race.ticks()),
        format!("view: {}", app.view.repr()),
    ];
    if app.clock.is_paused() {
        header.push("paused".to_owned());
    }
    if race.is_abandoned() {
        header.push("abandoned".to_owned());
    }
    let separator = format!(" {DOT} ");

    let searches = [Strategy::DepthFirst, Strategy::BreadthFirst]
        .into_iter()
        .map(|strategy| {
            format!(
                "{} {} ({})",
                strategy.abbreviation(),
                race.status(strategy),
                race.explored(strategy).len()
            )
        })
        .collect::<Vec<String>>()
        .join(&separator);
    let winner = race
        .winner()
        .map_or_else(|| "-".to_owned(), |winner| winner.abbreviation().to_owned());

    let mut lines = vec![
        Line::raw(header.join(&separator)).centered(),
        Line::raw(format!("{searches} {DOT} winner: {winner}")).centered(),
    ];
    if let Some(notice) = app.notice {
        lines.push(Line::styled(notice, Style::default().fg(Color::Yellow)).centered());
    }

    lines
}

/// Renders the status bar at the bottom of the screen.
pub(crate) fn status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title(KEY_HELP)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(Paragraph::new(status_lines(app)).block(block), area);
}
