use std::collections::VecDeque;

use macroquad::rand::gen_range;

pub const SCORE_PER_FOOD: u32 = 10;
/// Two buffered turns: one for the next tick, one tick of lookahead.
/// Anything past that is dropped so held keys cannot build up lag.
pub const INPUT_QUEUE_CAP: usize = 2;
const INITIAL_SNAKE_LENGTH: i32 = 3;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    fn shifted(self, direction: Direction) -> Cell {
        let (dx, dy) = direction.offset();
        Cell::new(self.x + dx, self.y + dy)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub const fn new(width: i32, height: i32) -> Self {
        Grid { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn center(&self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Outcome of one simulation tick. The collision variants are terminal
/// game events, not errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    Moved,
    Ate,
    HitWall,
    HitSelf,
}

impl StepResult {
    pub fn is_fatal(self) -> bool {
        matches!(self, StepResult::HitWall | StepResult::HitSelf)
    }
}

/// One run of gameplay: snake, heading, buffered turns, food and score.
/// Pure state; rendering and audio react to the returned [`StepResult`].
pub struct GameSession {
    grid: Grid,
    snake: VecDeque<Cell>, // head first
    direction: Direction,
    pending: VecDeque<Direction>,
    food: Cell,
    score: u32,
}

impl GameSession {
    pub fn new(grid: Grid) -> Self {
        let center = grid.center();
        // Body trails downward from the head, heading up.
        let snake: VecDeque<Cell> = (0..INITIAL_SNAKE_LENGTH)
            .map(|i| Cell::new(center.x, center.y + i))
            .collect();
        let food = place_food(grid, &snake);
        GameSession {
            grid,
            snake,
            direction: Direction::Up,
            pending: VecDeque::new(),
            food,
            score: 0,
        }
    }

    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Buffers a turn for an upcoming tick. Full queue drops the input.
    pub fn queue_direction(&mut self, direction: Direction) {
        if self.pending.len() < INPUT_QUEUE_CAP {
            self.pending.push_back(direction);
        }
    }

    /// Advances the simulation by one tick.
    pub fn step(&mut self) -> StepResult {
        // Consume at most one buffered turn. Only a direct reversal is
        // rejected, and a rejected turn is dropped without consulting
        // the next queue entry.
        if let Some(next) = self.pending.pop_front() {
            if next != self.direction.opposite() {
                self.direction = next;
            }
        }

        let new_head = self.head().shifted(self.direction);

        if !self.grid.contains(new_head) {
            return StepResult::HitWall;
        }
        // The tail cell still counts: it has not been popped yet.
        if self.snake.contains(&new_head) {
            return StepResult::HitSelf;
        }

        self.snake.push_front(new_head);

        if new_head == self.food {
            self.score += SCORE_PER_FOOD;
            self.food = place_food(self.grid, &self.snake);
            StepResult::Ate
        } else {
            self.snake.pop_back();
            StepResult::Moved
        }
    }
}

/// Rolls a uniformly random free cell. Terminates as long as the snake
/// leaves at least one cell of the grid open.
fn place_food(grid: Grid, snake: &VecDeque<Cell>) -> Cell {
    loop {
        let cell = Cell::new(gen_range(0, grid.width), gen_range(0, grid.height));
        if !snake.contains(&cell) {
            return cell;
        }
    }
}
