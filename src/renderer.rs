use std::time::Duration;

use crate::entities::{Enemy, GameState, Player, Projectile, ProjectileOwner};
use crate::geometry::screen_cell;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub score: u32,
    pub hi_score: u32,
    pub is_hi_score: bool,
    pub lives: u32,
    pub level: usize,
    pub level_name: Option<&'a str>,
    pub march_interval: f32,
    pub revival_remaining: Option<Duration>,
    pub frame_count: u64,
    pub area: Rect,
    pub edge_width: u16,
    pub fps: u32,
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::MainMenu => self.render_title(frame, view),
            GameState::Playing => self.render_game(frame, view),
            GameState::Paused => {
                self.render_game(frame, view);
                self.render_banner(frame, view, "PAUSED", "Press P to resume", Color::Yellow);
            }
            GameState::Waiting => {
                self.render_game(frame, view);
                let secs = view
                    .revival_remaining
                    .map_or(0.0, |remaining| remaining.as_secs_f32());
                let hint = format!("Respawning in {:.1}s", secs);
                self.render_banner(frame, view, "SHIP LOST", &hint, Color::LightRed);
            }
            GameState::Victory => self.render_end(frame, view, "EARTH IS SAFE!", Color::Green),
            GameState::GameOver => self.render_end(frame, view, "GAME OVER!", Color::Red),
        }
    }

    /// Narrow centred playfield inside the terminal
    pub fn game_area(area: Rect, edge_width: u16) -> Rect {
        if edge_width == 0 {
            return area;
        }
        let game_width = area.width.saturating_sub(edge_width * 2);
        let centered = Rect {
            x: area.x + edge_width,
            y: area.y,
            width: game_width,
            height: area.height,
        };
        Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .inner(centered)
    }

    fn render_title(&self, frame: &mut Frame, view: &RenderView) {
        let title = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().green(),
            Line::from("║     LOCKSTEP INVADERS     ║")
                .centered()
                .green()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().green(),
            Line::from(""),
            Line::from(format!("Hi-score: {}", view.hi_score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press Enter to start").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(title)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }

    /// Formation, cannon, shots and the HUD inside the bordered playfield
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let game_area = Self::game_area(view.area, view.edge_width);
        if view.edge_width > 0 {
            let border = Rect {
                x: game_area.x - 1,
                width: game_area.width + 2,
                ..game_area
            };
            frame.render_widget(
                Block::default()
                    .borders(Borders::LEFT | Borders::RIGHT)
                    .border_style(Style::default().fg(Color::DarkGray)),
                border,
            );
        }

        for enemy in view.enemies {
            let (r, g, b) = enemy.tint;
            draw_sprite(
                frame,
                game_area,
                screen_cell(enemy.position),
                &enemy.tier().get_sprite_lines(),
                enemy.tier().get_width(),
                Style::default().fg(Color::Rgb(r, g, b)).bold(),
            );
        }

        // Blink the cannon for a while after a respawn, hide it while lost
        let show_player = view.game_state != GameState::Waiting
            && (!view.player.is_flashing() || view.frame_count % 10 < 5);
        if show_player {
            draw_sprite(
                frame,
                game_area,
                (view.player.x, view.player.y),
                &view.player.get_sprite_lines(),
                view.player.get_width(),
                Style::default().fg(Color::Green).bold(),
            );
        }

        let buffer = frame.buffer_mut();
        for shot in view.projectiles {
            if shot.x >= game_area.width || shot.y >= game_area.height {
                continue;
            }
            let (symbol, color) = match shot.owner {
                ProjectileOwner::Player => ("|", Color::Yellow),
                ProjectileOwner::Enemy => ("!", Color::Magenta),
            };
            buffer.set_string(
                game_area.x + shot.x,
                game_area.y + shot.y,
                symbol,
                Style::default().fg(color),
            );
        }

        self.render_hud(frame, view);
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::DarkGray));
        let hi_style = if view.is_hi_score {
            Style::default().fg(Color::LightGreen).bold()
        } else {
            Style::default().fg(Color::White)
        };

        let stats = Line::from(vec![
            label("Score "),
            Span::styled(view.score.to_string(), Style::default().fg(Color::Yellow).bold()),
            label("  Hi "),
            Span::styled(view.hi_score.to_string(), hi_style),
            label("  Lives "),
            Span::styled("♥".repeat(view.lives as usize), Style::default().fg(Color::Red)),
            label("  Level "),
            Span::styled(
                format!("{} {}", view.level, view.level_name.unwrap_or("")),
                Style::default().fg(Color::Cyan).bold(),
            ),
            label("  March "),
            Span::styled(
                format!("{:.2}s", view.march_interval),
                Style::default().fg(Color::Magenta),
            ),
            label("  fps "),
            Span::raw(view.fps.to_string()),
        ]);
        let top = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), 1);
        frame.render_widget(Paragraph::new(stats), top);

        let keys = label("[A/D/Arrows: Move] [Space: Fire] [P: Pause] [T: Title] [Q: Quit]");
        let bottom = Rect {
            y: area.y + area.height.saturating_sub(1),
            ..top
        };
        frame.render_widget(Paragraph::new(Line::from(keys)).centered(), bottom);
    }

    /// Boxed message over the playfield
    fn render_banner(&self, frame: &mut Frame, view: &RenderView, title: &str, hint: &str, color: Color) {
        let area = view.area;
        let text = vec![
            Line::from(""),
            Line::from(title.to_string()).centered().bold().fg(color),
            Line::from(""),
            Line::from(hint.to_string()).centered().white(),
        ];
        let banner_area = Rect {
            x: area.x + (area.width / 2).saturating_sub(15),
            y: area.y + (area.height / 2).saturating_sub(3),
            width: 30.min(area.width),
            height: 6.min(area.height),
        };

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .alignment(Alignment::Center),
            banner_area,
        );
    }

    fn render_end(&self, frame: &mut Frame, view: &RenderView, headline: &str, color: Color) {
        let mut text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().fg(color),
            Line::from(format!("║ {:^25} ║", headline))
                .centered()
                .fg(color)
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().fg(color),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Hi-score: {}", view.hi_score))
                .centered()
                .cyan()
                .bold(),
        ];
        if view.is_hi_score {
            text.push(Line::from("NEW HI-SCORE!").centered().light_green().bold());
        }
        text.extend([
            Line::from(""),
            Line::from("Press Enter to play again").centered().white(),
            Line::from("Press T for the title screen").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ]);

        frame.render_widget(
            Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            view.area,
        );
    }
}

/// Draw a multi-line sprite at a playfield cell, skipped when it would not fit
fn draw_sprite(
    frame: &mut Frame,
    field: Rect,
    (x, y): (u16, u16),
    lines: &[&str],
    width: u16,
    style: Style,
) {
    let height = lines.len() as u16;
    if y + height > field.height || x + width >= field.width {
        return;
    }
    let text: Vec<Line> = lines.iter().map(|line| Line::from(*line).style(style)).collect();
    frame.render_widget(
        Paragraph::new(text),
        Rect::new(field.x + x, field.y + y, width, height),
    );
}
