//! Display and output formatting utilities

use crate::error::LifeResult;
use crate::game_of_life::{Board, CellState, GenerationResult, SimulationEngine, Statistics};
use serde::{Deserialize, Serialize};

/// Receives the board's dimensions and then every cell in row-major order
pub trait PresentationAdapter {
    fn begin(&mut self, width: usize, height: usize);
    fn cell(&mut self, row: usize, col: usize, state: CellState);
    fn finish(&mut self) {}
}

/// Feed a board through a presentation adapter
pub fn present<P: PresentationAdapter + ?Sized>(board: &Board, presenter: &mut P) {
    presenter.begin(board.width(), board.height());
    for (row, col) in board.coordinates() {
        presenter.cell(row, col, board.get(row, col));
    }
    presenter.finish();
}

/// Translate one click on a rendered cell into a single cell write
pub fn apply_click(engine: &mut SimulationEngine, row: usize, col: usize) -> LifeResult<CellState> {
    engine.toggle_cell(row, col)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// One character per cell
    Compact,
    /// Two characters per cell with row and column numbers
    WithCoords,
}

/// Renders a board as terminal text
#[derive(Debug)]
pub struct TextRenderer {
    style: TextStyle,
    width: usize,
    output: String,
}

impl TextRenderer {
    pub fn new(style: TextStyle) -> Self {
        Self {
            style,
            width: 0,
            output: String::new(),
        }
    }

    /// Render a whole board in one call
    pub fn render(board: &Board, style: TextStyle) -> String {
        let mut renderer = Self::new(style);
        present(board, &mut renderer);
        renderer.into_string()
    }

    pub fn into_string(self) -> String {
        self.output
    }
}

impl PresentationAdapter for TextRenderer {
    fn begin(&mut self, width: usize, height: usize) {
        self.width = width;
        self.output.clear();
        self.output.reserve((width * 2 + 4) * (height + 1));

        if self.style == TextStyle::WithCoords {
            self.output.push_str("   ");
            for x in 0..width {
                self.output.push_str(&format!("{:2}", x % 10));
            }
            self.output.push('\n');
        }
    }

    fn cell(&mut self, row: usize, col: usize, state: CellState) {
        let alive = state.is_alive();
        match self.style {
            TextStyle::Compact => self.output.push(if alive { '█' } else { '·' }),
            TextStyle::WithCoords => {
                if col == 0 {
                    self.output.push_str(&format!("{:2} ", row));
                }
                self.output.push_str(if alive { "██" } else { "··" });
            }
        }
        if col + 1 == self.width {
            self.output.push('\n');
        }
    }
}

/// Outcome of a batch of generations, printable as text or JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub generations: Vec<GenerationResult>,
    pub statistics: Statistics,
}

impl RunReport {
    pub fn new(
        engine: &SimulationEngine,
        seed: Option<u64>,
        generations: Vec<GenerationResult>,
    ) -> Self {
        Self {
            width: engine.width(),
            height: engine.height(),
            seed,
            generations,
            statistics: engine.statistics(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Summary table, one line per generation when `per_generation` is set
    pub fn format_text(&self, per_generation: bool) -> String {
        let mut output = String::new();

        if per_generation && !self.generations.is_empty() {
            output.push_str("Gen    | Born   | Died\n");
            output.push_str("-------|--------|-------\n");
            let first = self.statistics.generation + 1 - self.generations.len() as u64;
            for (i, result) in self.generations.iter().enumerate() {
                output.push_str(&format!(
                    "{:6} | {:6} | {:6}\n",
                    first + i as u64,
                    result.born,
                    result.died
                ));
            }
            output.push('\n');
        }

        let cells = self.width * self.height;
        output.push_str(&format!("Board: {}x{}\n", self.width, self.height));
        if let Some(seed) = self.seed {
            output.push_str(&format!("Seed: {}\n", seed));
        }
        output.push_str(&format!("Generation: {}\n", self.statistics.generation));
        output.push_str(&format!(
            "Population: {} ({:.1}%)\n",
            self.statistics.population,
            density(self.statistics.population, cells)
        ));
        if let Some(last) = self.statistics.last {
            output.push_str(&format!("Last step: +{} / -{}\n", last.born, last.died));
        }
        output.push_str(&format!(
            "Total born: {}, total died: {}\n",
            self.statistics.total_born, self.statistics.total_died
        ));

        output
    }
}

/// Percentage of living cells
pub fn density(population: usize, cells: usize) -> f64 {
    if cells == 0 {
        0.0
    } else {
        population as f64 / cells as f64 * 100.0
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        dims: Option<(usize, usize)>,
        cells: Vec<(usize, usize, CellState)>,
        finished: bool,
    }

    impl PresentationAdapter for Recorder {
        fn begin(&mut self, width: usize, height: usize) {
            self.dims = Some((width, height));
        }

        fn cell(&mut self, row: usize, col: usize, state: CellState) {
            self.cells.push((row, col, state));
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    #[test]
    fn test_present_visits_every_cell_once() {
        let board = Board::with_alive(3, 2, &[(1, 2)]).unwrap();
        let mut recorder = Recorder::default();
        present(&board, &mut recorder);

        assert_eq!(recorder.dims, Some((3, 2)));
        assert_eq!(recorder.cells.len(), 6);
        assert_eq!(recorder.cells[5], (1, 2, CellState::Alive));
        assert!(recorder.finished);
    }

    #[test]
    fn test_compact_rendering() {
        let board = Board::with_alive(3, 2, &[(0, 0), (1, 2)]).unwrap();
        let text = TextRenderer::render(&board, TextStyle::Compact);
        assert_eq!(text, "█··\n··█\n");
    }

    #[test]
    fn test_rendering_with_coords() {
        let board = Board::with_alive(3, 3, &[(1, 1)]).unwrap();
        let text = TextRenderer::render(&board, TextStyle::WithCoords);

        assert!(text.starts_with("    0 1 2\n"));
        assert!(text.contains(" 1 ··██··\n"));
    }

    #[test]
    fn test_apply_click_toggles_one_cell() {
        let mut engine = SimulationEngine::create(4, 4).unwrap();
        assert_eq!(apply_click(&mut engine, 2, 3).unwrap(), CellState::Alive);
        assert_eq!(engine.board().living_cells(), vec![(2, 3)]);
        assert!(apply_click(&mut engine, 4, 0).is_err());
    }

    #[test]
    fn test_run_report() {
        let board = Board::with_alive(3, 3, &[(1, 0), (1, 1), (1, 2)]).unwrap();
        let mut engine = SimulationEngine::from_board(board);
        let results = engine.run(2);
        let report = RunReport::new(&engine, Some(5), results);

        let text = report.format_text(true);
        assert!(text.contains("Board: 3x3"));
        assert!(text.contains("Seed: 5"));
        assert!(text.contains("Generation: 2"));
        assert!(text.contains("Total born: 4, total died: 4"));
        assert!(text.contains("     1 |      2 |      2"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["statistics"]["generation"], 2);
        assert_eq!(json["generations"][0]["born"], 2);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
        assert!(ColorOutput::warning("careful").contains("careful"));
        assert!(ColorOutput::error("failed").contains("failed"));
        assert!(ColorOutput::info("note").contains("note"));
    }
}
