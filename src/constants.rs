/// Points awarded per correct pick, round 1 through the final of a 128 draw
pub const DEFAULT_POINTS: [f64; 7] = [10.0, 20.0, 30.0, 50.0, 80.0, 120.0, 200.0];

/// Draw size of a Grand Slam singles event
pub const DEFAULT_DRAW_SIZE: u32 = 128;

/// Smallest draw that still contains a match
pub const MIN_DRAW_SIZE: u32 = 2;
