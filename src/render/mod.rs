//! Draw requests and the surfaces that display them. A [`Frame`] is captured
//! from the game once per turn; surfaces only paint it.

use std::io::{self, Write};

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use crate::game::{Game, Mode};
use crate::map::RoomKind;
use crate::map::fog::FogView;

pub const SCREEN_WIDTH: i32 = 80;
pub const SCREEN_HEIGHT: i32 = 50;
const GAUGE_WIDTH: i32 = 30;
const MAP_ORIGIN_X: i32 = 4;
const MAP_ORIGIN_Y: i32 = 9;
const SIDE_PANEL_X: i32 = 20;
const ACTIONS_Y: i32 = 20;
const LOG_PANEL_START: i32 = 34;
const LOG_ROWS: usize = 14;
const CHART_WIDTH: usize = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellCategory {
    Unknown,
    Player,
    Wall,
    Open,
    Memory,
    Demon,
    Light,
    Mirror,
    Companion,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellView {
    pub glyph: char,
    pub category: CellCategory,
}

impl CellView {
    fn of(room: Option<RoomKind>) -> Self {
        let Some(room) = room else {
            return Self {
                glyph: '?',
                category: CellCategory::Unknown,
            };
        };
        let category = match room {
            RoomKind::Wall => CellCategory::Wall,
            RoomKind::Empty => CellCategory::Open,
            RoomKind::Memory => CellCategory::Memory,
            RoomKind::Demon => CellCategory::Demon,
            RoomKind::Item => CellCategory::Light,
            RoomKind::Mirror => CellCategory::Mirror,
            RoomKind::Therapist | RoomKind::LovedOne | RoomKind::Stranger => {
                CellCategory::Companion
            }
        };
        Self {
            glyph: room.glyph(),
            category,
        }
    }

    fn player() -> Self {
        Self {
            glyph: '@',
            category: CellCategory::Player,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gauge {
    pub label: &'static str,
    pub value: i32,
    pub max: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattlePanel {
    pub demon: String,
    pub demon_power: i32,
    pub starting_power: i32,
    pub hope: i32,
    pub strength: i32,
    pub clarity: i32,
}

/// Everything a surface needs to draw one screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub title: String,
    pub hope: Gauge,
    pub burden: Gauge,
    /// Row-major fog-of-war view; empty outside exploration.
    pub cells: Vec<Vec<CellView>>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub actions: Vec<(String, String)>,
    /// Oldest first.
    pub messages: Vec<String>,
    pub battle: Option<BattlePanel>,
    pub summary: Vec<String>,
}

impl Frame {
    pub fn capture(game: &Game) -> Self {
        let player = &game.player;
        let banner = "SOUL DUNGEON: FROM ROCK BOTTOM TO GLORY";
        let title = match game.mode() {
            Mode::Title => banner.to_string(),
            Mode::Exploring => format!("{banner} - {}", game.phase.as_str().to_uppercase()),
            Mode::Battle { battle, .. } => format!("CONFRONTING {}", battle.demon.name.to_uppercase()),
            Mode::SavePrompt => "SAVE JOURNEY".to_string(),
            Mode::LoadPrompt { .. } => "LOAD JOURNEY".to_string(),
            Mode::GameOver => "DARKNESS OVERWHELMS".to_string(),
            Mode::Complete(_) => "YOUR JOURNEY".to_string(),
            Mode::Quit => "FAREWELL".to_string(),
        };

        let exploring = matches!(game.mode(), Mode::Exploring | Mode::SavePrompt);
        let (cells, location, status) = if exploring {
            let here = player.position;
            (
                fog_cells(&game.fog(), here),
                Some(format!(
                    "({}, {}) {}",
                    here.x,
                    here.y,
                    game.room_name(here)
                )),
                Some(player.status_description().to_string()),
            )
        } else {
            (Vec::new(), None, None)
        };

        let battle = match game.mode() {
            Mode::Battle { battle, .. } => Some(BattlePanel {
                demon: battle.demon.name.clone(),
                demon_power: battle.demon.power,
                starting_power: battle.demon.starting_power,
                hope: player.hope,
                strength: player.strength,
                clarity: player.clarity,
            }),
            _ => None,
        };

        let summary = match game.mode() {
            Mode::Complete(summary) => {
                let mut lines = summary.lines();
                if summary.hope_over_time.len() > 1 {
                    lines.push("Your Hope Over Time:".to_string());
                    lines.extend(hope_chart(&summary.hope_over_time, CHART_WIDTH));
                }
                lines
            }
            _ => Vec::new(),
        };

        Self {
            title,
            hope: Gauge {
                label: "Hope",
                value: player.hope,
                max: crate::game::player::MAX_HOPE,
            },
            burden: Gauge {
                label: "Burden",
                value: player.burden,
                max: crate::game::player::MAX_BURDEN,
            },
            cells,
            location,
            status,
            actions: game.available_actions(),
            messages: game.messages().iter().take(LOG_ROWS).rev().cloned().collect(),
            battle,
            summary,
        }
    }
}

fn fog_cells(fog: &FogView, here: Point) -> Vec<Vec<CellView>> {
    (0..fog.height)
        .map(|y| {
            (0..fog.width)
                .map(|x| {
                    let point = Point::new(x, y);
                    if point == here {
                        CellView::player()
                    } else {
                        CellView::of(fog.cell(point))
                    }
                })
                .collect()
        })
        .collect()
}

/// One bar per step, scaled against the highest value.
pub fn hope_chart(series: &[i32], width: usize) -> Vec<String> {
    let peak = series.iter().copied().max().unwrap_or(0).max(1);
    series
        .iter()
        .enumerate()
        .map(|(step, &hope)| {
            let filled = (hope.max(0) as usize * width) / peak as usize;
            format!("Step {step:<2} {} {hope}", "█".repeat(filled))
        })
        .collect()
}

/// Greedy word wrap; words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

pub trait RenderSurface {
    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}

fn category_color(category: CellCategory) -> RGB {
    match category {
        CellCategory::Unknown => RGB::named(DARK_GRAY),
        CellCategory::Player => RGB::named(YELLOW),
        CellCategory::Wall => RGB::named(GRAY),
        CellCategory::Open => RGB::named(WHITE),
        CellCategory::Memory => RGB::named(LIGHT_BLUE),
        CellCategory::Demon => RGB::named(RED),
        CellCategory::Light => RGB::named(GOLD),
        CellCategory::Mirror => RGB::named(CYAN),
        CellCategory::Companion => RGB::named(LIGHT_GREEN),
    }
}

/// Paints frames onto a bracket-terminal console.
pub struct TerminalSurface<'a> {
    ctx: &'a mut BTerm,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(ctx: &'a mut BTerm) -> Self {
        Self { ctx }
    }

    fn draw_header(&mut self, frame: &Frame) {
        let ctx = &mut *self.ctx;
        ctx.print_color_centered(1, RGB::named(YELLOW), RGB::named(BLACK), &frame.title);
        ctx.draw_box(0, 2, SCREEN_WIDTH - 1, 4, RGB::named(GRAY), RGB::named(BLACK));
        for (row, gauge) in [&frame.hope, &frame.burden].into_iter().enumerate() {
            let y = 3 + row as i32 * 2;
            let color = match (gauge.label, gauge.value) {
                ("Hope", v) if v < 20 => RGB::named(ORANGE),
                ("Hope", _) => RGB::named(LIGHT_GREEN),
                _ => RGB::named(PURPLE),
            };
            ctx.print_color(2, y, RGB::named(WHITE), RGB::named(BLACK), gauge.label);
            ctx.draw_bar_horizontal(10, y, GAUGE_WIDTH, gauge.value, gauge.max, color, RGB::named(BLACK));
            ctx.print(
                12 + GAUGE_WIDTH,
                y,
                format!("{}/{}", gauge.value, gauge.max),
            );
        }
    }

    fn draw_grid(&mut self, frame: &Frame) {
        for (y, row) in frame.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                self.ctx.set(
                    MAP_ORIGIN_X + x as i32 * 2,
                    MAP_ORIGIN_Y + y as i32 * 2,
                    category_color(cell.category),
                    RGB::named(BLACK),
                    to_cp437(cell.glyph),
                );
            }
        }
    }

    fn draw_side_panel(&mut self, frame: &Frame) {
        let width = (SCREEN_WIDTH - SIDE_PANEL_X - 2) as usize;
        let mut y = MAP_ORIGIN_Y;
        if let Some(location) = &frame.location {
            self.ctx
                .print_color(SIDE_PANEL_X, y, RGB::named(LIGHT_CYAN), RGB::named(BLACK), location);
            y += 2;
        }
        if let Some(status) = &frame.status {
            for line in wrap(status, width) {
                self.ctx.print(SIDE_PANEL_X, y, line);
                y += 1;
            }
        }
        if let Some(panel) = &frame.battle {
            self.ctx.print_color(
                SIDE_PANEL_X,
                y,
                RGB::named(RED),
                RGB::named(BLACK),
                format!("{} power: {}", panel.demon, panel.demon_power),
            );
            self.ctx.draw_bar_horizontal(
                SIDE_PANEL_X,
                y + 1,
                GAUGE_WIDTH,
                panel.demon_power.max(0),
                panel.starting_power.max(1),
                RGB::named(RED),
                RGB::named(BLACK),
            );
            self.ctx.print(
                SIDE_PANEL_X,
                y + 3,
                format!(
                    "Hope {}  Strength {}  Clarity {}",
                    panel.hope, panel.strength, panel.clarity
                ),
            );
        }
        for (row, line) in frame.summary.iter().enumerate() {
            self.ctx.print(2, MAP_ORIGIN_Y + row as i32, line);
        }
    }

    fn draw_actions(&mut self, frame: &Frame) {
        let mut x = 2;
        let mut y = ACTIONS_Y;
        for (key, label) in &frame.actions {
            let entry = format!("[{key}] {label}");
            let len = entry.chars().count() as i32;
            if x + len >= SCREEN_WIDTH - 1 {
                x = 2;
                y += 1;
            }
            self.ctx
                .print_color(x, y, RGB::named(LIGHT_BLUE), RGB::named(BLACK), &entry);
            x += len + 2;
        }
    }

    fn draw_log(&mut self, frame: &Frame) {
        let width = (SCREEN_WIDTH - 4) as usize;
        let lines: Vec<String> = frame
            .messages
            .iter()
            .flat_map(|message| wrap(message, width))
            .collect();
        let visible = &lines[lines.len().saturating_sub(LOG_ROWS)..];
        let top = LOG_PANEL_START - 1;
        self.ctx.draw_box(
            0,
            top,
            SCREEN_WIDTH - 1,
            SCREEN_HEIGHT - top - 1,
            RGB::named(DARK_GRAY),
            RGB::named(BLACK),
        );
        self.ctx
            .print_color(2, top, RGB::named(WHITE), RGB::named(BLACK), " Journal ");
        for (row, line) in visible.iter().enumerate() {
            self.ctx.print(2, top + 1 + row as i32, line);
        }
    }
}

impl RenderSurface for TerminalSurface<'_> {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        self.ctx.cls();
        self.draw_header(frame);
        self.draw_grid(frame);
        self.draw_side_panel(frame);
        self.draw_actions(frame);
        self.draw_log(frame);
        Ok(())
    }
}

/// Writes frames as plain text, for headless runs.
pub struct TextSurface<W: Write> {
    out: W,
}

impl<W: Write> TextSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn text_gauge(gauge: &Gauge) -> String {
    let max = gauge.max.max(1);
    let filled = (gauge.value.clamp(0, max) * GAUGE_WIDTH / max) as usize;
    format!(
        "{:<7}[{}{}] {}/{}",
        gauge.label,
        "#".repeat(filled),
        ".".repeat(GAUGE_WIDTH as usize - filled),
        gauge.value,
        gauge.max
    )
}

impl<W: Write> RenderSurface for TextSurface<W> {
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "==== {} ====", frame.title)?;
        writeln!(out, "{}", text_gauge(&frame.hope))?;
        writeln!(out, "{}", text_gauge(&frame.burden))?;
        for row in &frame.cells {
            let line: Vec<String> = row.iter().map(|cell| cell.glyph.to_string()).collect();
            writeln!(out, "  {}", line.join(" "))?;
        }
        if let Some(location) = &frame.location {
            writeln!(out, "{location}")?;
        }
        if let Some(status) = &frame.status {
            writeln!(out, "{status}")?;
        }
        if let Some(panel) = &frame.battle {
            writeln!(
                out,
                "{} power: {}/{} | Hope {} Strength {} Clarity {}",
                panel.demon,
                panel.demon_power,
                panel.starting_power,
                panel.hope,
                panel.strength,
                panel.clarity
            )?;
        }
        for line in &frame.summary {
            writeln!(out, "{line}")?;
        }
        for message in &frame.messages {
            writeln!(out, "> {message}")?;
        }
        let actions: Vec<String> = frame
            .actions
            .iter()
            .map(|(key, label)| format!("[{key}] {label}"))
            .collect();
        writeln!(out, "{}", actions.join("  "))?;
        writeln!(out)?;
        Ok(())
    }
}
