use anyhow::{Context as _, Result};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, Stylize},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use fps_clock::FpsClock;

use smallvec::{SmallVec, ToSmallVec};

use std::{
    io::{self, stdout, Write},
    time::{Duration, Instant},
};

use crate::{
    constants::{CELL_PITCH, FOOD_CELLS, FOOD_OFFSET},
    data::*,
    game::{Command, Food, Position, Renderer, Snake},
    graphics::{board::score_line, Argb, Pixel},
    modes::Mode,
};

const GRID: usize = FOOD_CELLS as usize;
const MAX_RUNS: usize = 16;

/// Board frame in terminal cells: status line, two borders, 20 rows, help line.
const FRAME_W: u16 = GRID as u16 * 2 + 2;
const FRAME_H: u16 = GRID as u16 + 4;

const EMPTY_COLOR: Argb = 0xFF_60_60_60;
const HELP: &str = "arrows/wasd turn  r restart  . style  q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Body(Argb),
    Head(Argb),
    Food(Argb),
}

impl Cell {
    fn glyph(self, style: Mode) -> ([char; 2], Argb) {
        match (style, self) {
            (Mode::ConAscii, Cell::Empty) => (['.', ' '], EMPTY_COLOR),
            (Mode::ConAscii, Cell::Body(c)) => (['o', ' '], c),
            (Mode::ConAscii, Cell::Head(c)) => (['@', ' '], c),
            (Mode::ConAscii, Cell::Food(c)) => (['*', ' '], c),

            (_, Cell::Empty) => ([' ', ' '], EMPTY_COLOR),
            (_, Cell::Body(c) | Cell::Head(c) | Cell::Food(c)) => (['█', '█'], c),
        }
    }
}

/// Terminal cell (column, row from the top) holding a lattice position.
/// Positions past the walls have no cell.
fn cell_of(pos: Position) -> Option<(usize, usize)> {
    let col = (pos.x - FOOD_OFFSET).div_euclid(CELL_PITCH);
    let row = (pos.y - FOOD_OFFSET).div_euclid(CELL_PITCH);

    let range = 0..FOOD_CELLS;
    if !range.contains(&col) || !range.contains(&row) {
        return None;
    }

    Some((col as usize, GRID - 1 - row as usize))
}

/// Top-left corner that centres the frame in a terminal of size `s`.
fn origin_for(s: (u16, u16)) -> (u16, u16) {
    (
        s.0.saturating_sub(FRAME_W) / 2,
        s.1.saturating_sub(FRAME_H) / 2,
    )
}

struct ColoredString {
    pub string: SmallVec<[char; FRAME_W as usize]>,
    pub fg: Argb,
}

impl ColoredString {
    pub fn new(ch: char, fg: Argb) -> Self {
        Self {
            string: [ch].to_smallvec(),
            fg,
        }
    }

    pub fn append(&mut self, ch: char, fg: Argb) -> bool {
        if self.fg != fg {
            return false;
        }

        self.string.push(ch);
        true
    }
}

/// Merges neighbouring cells of the same color into one print.
trait StyledLine {
    fn init() -> Self;
    fn clear_line(&mut self);
    fn push_pixel(&mut self, ch: char, fg: Argb);
    fn queue_print(&self, out: &mut impl Write) -> io::Result<()>;
}

impl StyledLine for SmallVec<[ColoredString; MAX_RUNS]> {
    fn init() -> Self {
        Self::new()
    }

    fn clear_line(&mut self) {
        self.clear();
    }

    fn push_pixel(&mut self, ch: char, fg: Argb) {
        if let Some(last) = self.last_mut() {
            if last.append(ch, fg) {
                return;
            }
        }

        self.push(ColoredString::new(ch, fg));
    }

    fn queue_print(&self, out: &mut impl Write) -> io::Result<()> {
        for ColoredString { string, fg } in self {
            let [_, r, g, b] = fg.decompose();
            queue!(
                out,
                Print(
                    string
                        .iter()
                        .collect::<String>()
                        .with(Color::Rgb { r, g, b })
                )
            )?;
        }

        Ok(())
    }
}

/// Keeps a 20x20 cell picture of the board and prints it on demand.
pub struct ConsoleRenderer {
    cells: Vec<Cell>,
    status: (u32, u32, bool),
    style: Mode,
    origin: (u16, u16),
    dirty: bool,
}

impl ConsoleRenderer {
    pub fn new(style: Mode) -> Self {
        Self {
            cells: vec![Cell::Empty; GRID * GRID],
            status: (0, 0, false),
            style,
            origin: (0, 0),
            dirty: true,
        }
    }

    pub fn set_style(&mut self, style: Mode) {
        self.style = style;
        self.dirty = true;
    }

    pub fn set_origin(&mut self, origin: (u16, u16)) {
        self.origin = origin;
        self.dirty = true;
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn put(&mut self, pos: Position, cell: Cell) {
        if let Some((col, row)) = cell_of(pos) {
            self.cells[row * GRID + col] = cell;
        }
    }

    pub fn queue_frame(&self, out: &mut impl Write) -> io::Result<()> {
        let (ox, oy) = self.origin;
        let (score, high_score, game_over) = self.status;
        let border = format!("+{}+", "-".repeat(GRID * 2));

        queue!(
            out,
            ResetColor,
            MoveTo(ox, oy),
            Print(format!(
                "{:<width$}",
                score_line(score, high_score),
                width = FRAME_W as usize
            )),
            MoveTo(ox, oy + 1),
            Print(&border)
        )?;

        let mut line = SmallVec::<[ColoredString; MAX_RUNS]>::init();

        for (y, row) in self.cells.chunks_exact(GRID).enumerate() {
            queue!(out, MoveTo(ox, oy + 2 + y as u16), Print('|'))?;

            for cell in row {
                let (chars, fg) = cell.glyph(self.style);
                for ch in chars {
                    line.push_pixel(ch, fg);
                }
            }

            line.queue_print(out)?;
            line.clear_line();

            queue!(out, ResetColor, Print('|'))?;
        }

        queue!(
            out,
            MoveTo(ox, oy + 2 + GRID as u16),
            Print(&border),
            MoveTo(ox, oy + 3 + GRID as u16),
            Print(format!("{:<width$}", HELP, width = FRAME_W as usize))
        )?;

        if game_over {
            let text = "Game Over";
            let x = ox + 1 + (GRID as u16 * 2 - text.len() as u16) / 2;
            let y = oy + 2 + GRID as u16 / 2 - 1;
            queue!(
                out,
                MoveTo(x, y),
                Print(text.with(Color::White).on(Color::DarkRed))
            )?;
        }

        Ok(())
    }
}

impl Renderer for ConsoleRenderer {
    fn draw_scene(&mut self, snake: &Snake, food: &Food) {
        self.cells.fill(Cell::Empty);

        let segments = snake.segments();
        let last = segments.len().saturating_sub(1);

        for (i, segment) in segments.iter().enumerate() {
            let cell = if i == last {
                Cell::Head(segment.color)
            } else {
                Cell::Body(segment.color)
            };
            self.put(segment.pos, cell);
        }

        self.put(food.position(), Cell::Food(food.color()));
        self.dirty = true;
    }

    fn draw_status(&mut self, score: u32, high_score: u32, game_over: bool) {
        self.status = (score, high_score, game_over);
        self.dirty = true;
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ConAction {
    Game(Command),
    SwitchStyle,
    Exit,
}

fn key_action(event: KeyEvent) -> Option<ConAction> {
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(ConAction::Exit);
    }

    let cmd = match event.code {
        KeyCode::Up | KeyCode::Char('w') => Command::Up,
        KeyCode::Down | KeyCode::Char('s') => Command::Down,
        KeyCode::Left | KeyCode::Char('a') => Command::Left,
        KeyCode::Right | KeyCode::Char('d') => Command::Right,

        KeyCode::Char('r') => Command::Restart,

        KeyCode::Char('.') => return Some(ConAction::SwitchStyle),

        KeyCode::Char('q') | KeyCode::Esc => return Some(ConAction::Exit),

        _ => return None,
    };

    Some(ConAction::Game(cmd))
}

/// Drains pending terminal events without blocking. Returns true when the
/// player asked to quit.
fn control_key_events_con(
    prog: &mut Program,
    game: &mut Game<ConsoleRenderer>,
    stdout: &mut impl Write,
) -> Result<bool> {
    while poll(Duration::ZERO)? {
        match read()? {
            Event::Key(event) if event.kind == KeyEventKind::Press => match key_action(event) {
                Some(ConAction::Game(cmd)) => game.handle(cmd),

                Some(ConAction::SwitchStyle) => {
                    prog.set_mode(prog.mode().next());
                    game.renderer_mut().set_style(prog.mode());
                }

                Some(ConAction::Exit) => return Ok(true),

                None => {}
            },

            Event::Resize(w, h) => {
                queue!(stdout, Clear(ClearType::All))?;
                game.renderer_mut().set_origin(origin_for((w, h)));
            }

            _ => {}
        }
    }

    Ok(false)
}

fn run(prog: &mut Program, game: &mut Game<ConsoleRenderer>, stdout: &mut impl Write) -> Result<()> {
    let mut clock = FpsClock::new(prog.fps());

    game.renderer_mut()
        .set_origin(origin_for(size().context("failed to query terminal size")?));

    loop {
        if control_key_events_con(prog, game, stdout)? {
            return Ok(());
        }

        if game.scheduler_mut().fire(Instant::now()) {
            game.tick();
        }

        if game.renderer_mut().take_dirty() {
            game.renderer().queue_frame(stdout)?;
            stdout.flush()?;
        }

        clock.tick();
    }
}

fn enter_screen(out: &mut impl Write) -> io::Result<()> {
    queue!(
        out,
        EnterAlternateScreen,
        Hide,
        Clear(ClearType::All),
        SetAttribute(Attribute::Bold)
    )?;
    out.flush()
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), LeaveAlternateScreen, Show)?;
    out.flush()
}

/// Runs `body` on the alternate screen with raw mode on. The terminal is
/// restored whatever `body` returns, and an error from `body` is reported
/// ahead of any restore error.
fn terminal_session<W: Write>(
    out: &mut W,
    enable_raw: impl FnOnce() -> io::Result<()>,
    disable_raw: impl FnOnce() -> io::Result<()>,
    body: impl FnOnce(&mut W) -> Result<()>,
) -> Result<()> {
    enable_raw().context("failed to enable raw mode")?;

    let result = enter_screen(out)
        .context("failed to enter the alternate screen")
        .and_then(|_| body(out));

    let left = leave_screen(out).context("failed to leave the alternate screen");
    let raw = disable_raw().context("failed to disable raw mode");

    result?;
    left?;
    raw
}

pub fn con_main(mut prog: Program) -> Result<()> {
    prog.print_startup_info();

    let mut stdout = stdout();
    let mut game = prog.new_game(ConsoleRenderer::new(prog.mode()));

    terminal_session(&mut stdout, enable_raw_mode, disable_raw_mode, |out| {
        run(&mut prog, &mut game, out)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::food::FOOD_COLOR;
    use crate::game::snake::SNAKE_COLOR;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn frame(r: &ConsoleRenderer) -> String {
        let mut out = Vec::new();
        r.queue_frame(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn fresh(style: Mode) -> ConsoleRenderer {
        let mut r = ConsoleRenderer::new(style);
        let snake = Snake::new(Position::new(315, 315), SNAKE_COLOR);
        r.draw_scene(&snake, &Food::at(Position::new(105, 555)));
        r.draw_status(0, 30, false);
        r
    }

    #[test]
    fn lattice_maps_to_cells() {
        assert_eq!(cell_of(Position::new(15, 15)), Some((0, 19)));
        assert_eq!(cell_of(Position::new(585, 585)), Some((19, 0)));
        assert_eq!(cell_of(Position::new(315, 315)), Some((10, 9)));
        assert_eq!(cell_of(Position::new(615, 315)), None);
        assert_eq!(cell_of(Position::new(315, -15)), None);
    }

    #[test]
    fn keys_map_to_actions() {
        assert_eq!(key_action(press(KeyCode::Up)), Some(ConAction::Game(Command::Up)));
        assert_eq!(key_action(press(KeyCode::Char('a'))), Some(ConAction::Game(Command::Left)));
        assert_eq!(key_action(press(KeyCode::Char('s'))), Some(ConAction::Game(Command::Down)));
        assert_eq!(key_action(press(KeyCode::Right)), Some(ConAction::Game(Command::Right)));
        assert_eq!(key_action(press(KeyCode::Char('r'))), Some(ConAction::Game(Command::Restart)));
        assert_eq!(key_action(press(KeyCode::Char('.'))), Some(ConAction::SwitchStyle));
        assert_eq!(key_action(press(KeyCode::Esc)), Some(ConAction::Exit));
        assert_eq!(
            key_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(ConAction::Exit)
        );
        assert_eq!(key_action(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn block_frame_paints_snake_and_food() {
        let r = fresh(Mode::ConBlock);
        let text = frame(&r);
        assert_eq!(text.matches('█').count(), 4);
        assert!(text.contains("Score: 0 High Score: 30"));
        assert!(!text.contains("Game Over"));
    }

    #[test]
    fn ascii_frame_marks_head_and_food() {
        let mut r = fresh(Mode::ConAscii);
        let mut snake = Snake::new(Position::new(315, 315), SNAKE_COLOR);
        snake.grow();
        snake.set_direction(crate::game::Direction::Right);
        snake.advance(Position::new(15, 15));
        r.draw_scene(&snake, &Food::at(Position::new(15, 15)));

        let text = frame(&r);
        assert_eq!(text.matches('@').count(), 1);
        let labels = HELP.matches('o').count() + score_line(0, 30).matches('o').count();
        assert_eq!(text.matches('o').count(), 1 + labels);
        assert_eq!(text.matches('*').count(), 1);
    }

    #[test]
    fn banner_follows_status() {
        let mut r = fresh(Mode::ConBlock);
        r.draw_status(0, 30, true);
        assert!(frame(&r).contains("Game Over"));
    }

    #[test]
    fn same_color_runs_are_merged() {
        let mut line = SmallVec::<[ColoredString; MAX_RUNS]>::init();
        for _ in 0..6 {
            line.push_pixel(' ', EMPTY_COLOR);
        }
        line.push_pixel('█', FOOD_COLOR);
        line.push_pixel('█', FOOD_COLOR);
        line.push_pixel(' ', EMPTY_COLOR);

        assert_eq!(line.len(), 3);
        assert_eq!(line[0].string.len(), 6);
        assert_eq!(line[1].string.len(), 2);
    }

    #[test]
    fn style_switch_marks_dirty() {
        let mut r = fresh(Mode::ConBlock);
        assert!(r.take_dirty());
        r.set_style(Mode::ConBlock.next());
        assert!(r.take_dirty());
        assert!(!r.take_dirty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn raw_mode_is_disabled_when_screen_setup_fails() {
        let disabled = std::cell::Cell::new(false);
        let ran = std::cell::Cell::new(false);

        let res = terminal_session(
            &mut BrokenPipe,
            || Ok(()),
            || {
                disabled.set(true);
                Ok(())
            },
            |_| {
                ran.set(true);
                Ok(())
            },
        );

        assert!(res.is_err());
        assert!(!ran.get());
        assert!(disabled.get());
    }

    #[test]
    fn loop_error_wins_over_restore_error() {
        let mut out = Vec::new();
        let res = terminal_session(
            &mut out,
            || Ok(()),
            || Err(io::Error::new(io::ErrorKind::Other, "tty gone")),
            |_| Err(anyhow::anyhow!("game loop broke")),
        );

        assert_eq!(res.unwrap_err().to_string(), "game loop broke");
    }

    #[test]
    fn restore_error_surfaces_after_a_clean_loop() {
        let mut out = Vec::new();
        let res = terminal_session(
            &mut out,
            || Ok(()),
            || Err(io::Error::new(io::ErrorKind::Other, "tty gone")),
            |_| Ok(()),
        );

        assert_eq!(res.unwrap_err().to_string(), "failed to disable raw mode");
    }

    #[test]
    fn session_leaves_the_alternate_screen() {
        let mut out = Vec::new();
        terminal_session(&mut out, || Ok(()), || Ok(()), |_| Ok(())).unwrap();

        let mut expected = Vec::new();
        leave_screen(&mut expected).unwrap();
        assert!(out.ends_with(&expected));
    }

    #[test]
    fn frame_is_centred() {
        assert_eq!(origin_for((80, 24)), (19, 0));
        assert_eq!(origin_for((10, 10)), (0, 0));
    }
}
