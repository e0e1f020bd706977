/// Hangman renderer - draws engine state, owns no game logic
use rand_core::RngCore;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::core::renderer::GameRenderer;
use crate::games::hangman::game::{HangmanGame, RoundResult, KEYS, KEYS_PER_ROW};
use crate::games::hangman::round::{RoundState, MAX_MISTAKES};

/// Gallows canvas size in cells
const GALLOWS_WIDTH: usize = 12;
const GALLOWS_HEIGHT: usize = 7;

/// Drawing parts in the order they appear: (row, column, glyphs)
const GALLOWS_PARTS: [&[(usize, usize, char)]; 10] = [
    // base
    &[(6, 0, '='), (6, 1, '='), (6, 2, '='), (6, 3, '='), (6, 4, '='), (6, 5, '='), (6, 6, '='), (6, 7, '='), (6, 8, '='), (6, 9, '=')],
    // post
    &[(1, 2, '|'), (2, 2, '|'), (3, 2, '|'), (4, 2, '|'), (5, 2, '|')],
    // beam
    &[(0, 2, '+'), (0, 3, '-'), (0, 4, '-'), (0, 5, '-'), (0, 6, '-'), (0, 7, '-'), (0, 8, '+')],
    // rope
    &[(1, 8, '|')],
    // head
    &[(2, 8, 'O')],
    // body
    &[(3, 8, '|')],
    // left arm
    &[(3, 7, '/')],
    // right arm
    &[(3, 9, '\\')],
    // left leg
    &[(4, 7, '/')],
    // right leg
    &[(4, 9, '\\')],
];

#[derive(Debug)]
pub struct HangmanRenderer;

impl<R: RngCore> GameRenderer<HangmanGame<R>> for HangmanRenderer {
    fn render(frame: &mut Frame, game: &HangmanGame<R>) {
        let round = game.round();
        let [nav, info, gallows, word, keyboard, status, _] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(GALLOWS_HEIGHT as u16 + 2),
            Constraint::Length(3),
            Constraint::Length(KEYS.len().div_ceil(KEYS_PER_ROW) as u16 + 2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(frame.area());

        render_navigation(frame, nav);
        render_info(frame, info, game.score(), round);
        render_gallows(frame, gallows, round.wrong().len());
        render_word(frame, word, round);
        render_keyboard(frame, keyboard, round, game.cursor());

        let message = Paragraph::new(game.message())
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(message, status);

        if let Some(result) = game.result() {
            render_result_dialog(frame, &result);
        }
    }
}

fn render_navigation(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title, hint] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(30)]).areas(inner);
    frame.render_widget(
        Paragraph::new("HANGMAN")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        title,
    );
    frame.render_widget(
        Paragraph::new("[Ctrl+N] New Word  [Esc] Quit")
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::Gray)),
        hint,
    );
}

/// Text for the chances counter, e.g. `3 chances left`
pub(crate) fn chances_label(remaining: usize) -> String {
    let noun = if remaining == 1 { "chance" } else { "chances" };
    format!("{remaining} {noun} left")
}

fn render_info(frame: &mut Frame, area: Rect, score: u32, round: &RoundState) {
    let line = Line::from(vec![
        Span::styled(
            format!("Score: {score}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Category: {}", round.category()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("   "),
        Span::styled("♥ ", Style::default().fg(Color::Red)),
        Span::raw(chances_label(round.remaining_chances())),
    ]);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Number of gallows parts shown; the figure completes on the losing guess
pub(crate) fn visible_parts(wrong: usize) -> usize {
    (wrong * GALLOWS_PARTS.len() / MAX_MISTAKES).min(GALLOWS_PARTS.len())
}

/// Gallows drawing as text rows for `wrong` mistakes
pub(crate) fn gallows_lines(wrong: usize) -> Vec<String> {
    let mut canvas = [[' '; GALLOWS_WIDTH]; GALLOWS_HEIGHT];
    for part in GALLOWS_PARTS.iter().take(visible_parts(wrong)) {
        for &(row, col, glyph) in part.iter() {
            canvas[row][col] = glyph;
        }
    }
    canvas
        .iter()
        .map(|row| row.iter().collect::<String>().trim_end().to_string())
        .collect()
}

fn render_gallows(frame: &mut Frame, area: Rect, wrong: usize) {
    let lines: Vec<Line> = gallows_lines(wrong).into_iter().map(Line::from).collect();
    let [column] = Layout::horizontal([Constraint::Length(GALLOWS_WIDTH as u16 + 2)])
        .flex(Flex::Center)
        .areas(area);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL)),
        column,
    );
}

fn render_word(frame: &mut Frame, area: Rect, round: &RoundState) {
    let mut spans = Vec::new();
    for (i, slot) in round.masked_word().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let letter = slot.unwrap_or(' ');
        spans.push(Span::styled(
            format!("[{letter}]"),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Word")),
        area,
    );
}

fn key_style(round: &RoundState, key: char, selected: bool) -> Style {
    let mut style = Style::default();
    if round.correct().contains(&key) {
        style = style.fg(Color::Green);
    } else if round.wrong().contains(&key) {
        style = style.fg(Color::Red);
    }
    if round.guessed().contains(&key) {
        style = style.add_modifier(Modifier::DIM);
    }
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

fn render_keyboard(frame: &mut Frame, area: Rect, round: &RoundState, cursor: usize) {
    let lines: Vec<Line> = KEYS
        .chunks(KEYS_PER_ROW)
        .enumerate()
        .map(|(row, keys)| {
            let spans: Vec<Span> = keys
                .iter()
                .enumerate()
                .map(|(col, &key)| {
                    let selected = row * KEYS_PER_ROW + col == cursor;
                    Span::styled(format!(" {key} "), key_style(round, key, selected))
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Keyboard")),
        area,
    );
}

fn render_result_dialog(frame: &mut Frame, result: &RoundResult) {
    let area = popup_area(frame.area(), 50, 9);
    let color = if result.is_win { Color::Green } else { Color::Red };

    let lines = vec![
        Line::from(Span::styled(
            result.title.as_str(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(result.description.as_str()),
        Line::default(),
        Line::from(Span::styled(
            "[Enter] Play Again",
            Style::default().fg(Color::Black).bg(color),
        )),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::round::RoundEngine;
    use crate::games::hangman::word_bank::{Category, WordBank};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn game_with_word(word: &str) -> HangmanGame<StdRng> {
        let engine = RoundEngine::new(WordBank::default(), StdRng::seed_from_u64(3));
        let mut game = HangmanGame::new(engine, None);
        game.replace_round(RoundState::new(Category::new("fruits"), word).unwrap());
        game
    }

    fn draw(game: &HangmanGame<StdRng>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal
            .draw(|f| HangmanRenderer::render(f, game))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn parts_scale_to_the_mistake_limit() {
        assert_eq!(visible_parts(0), 0);
        assert_eq!(visible_parts(1), 2);
        assert_eq!(visible_parts(MAX_MISTAKES), GALLOWS_PARTS.len());
        assert_eq!(visible_parts(MAX_MISTAKES + 3), GALLOWS_PARTS.len());
    }

    #[test]
    fn empty_gallows_then_full_figure() {
        assert!(gallows_lines(0).iter().all(|l| l.is_empty()));

        let full = gallows_lines(MAX_MISTAKES);
        assert_eq!(full[0], "  +-----+");
        assert_eq!(full[2], "  |     O");
        assert_eq!(full[3], "  |    /|\\");
        assert_eq!(full[4], "  |    / \\");
        assert_eq!(full[6], "==========");
    }

    #[test]
    fn chances_label_is_singular_for_one() {
        assert_eq!(chances_label(1), "1 chance left");
        assert_eq!(chances_label(0), "0 chances left");
        assert_eq!(chances_label(5), "5 chances left");
    }

    #[test]
    fn screen_shows_info_word_and_keyboard() {
        let mut game = game_with_word("PEAR");
        game.guess('P');
        game.guess('Z');

        let screen = draw(&game);
        assert!(screen.contains("HANGMAN"));
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("Category: fruits"));
        assert!(screen.contains("4 chances left"));
        assert!(screen.contains("[P] [ ] [ ] [ ]"));
        assert!(screen.contains(" A  B  C "));
        assert!(screen.contains("Sorry, 'Z' is not in the word."));
        assert!(!screen.contains("Play Again"));
    }

    #[test]
    fn finished_round_draws_result_dialog() {
        let mut game = game_with_word("FIG");
        for c in ['F', 'I', 'G'] {
            game.guess(c);
        }

        let screen = draw(&game);
        assert!(screen.contains("Congratulations!"));
        assert!(screen.contains("Play Again"));
        assert!(screen.contains("Score: 1"));
    }
}
