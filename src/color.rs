use std::fmt::Display;

/// A named average color, produced for one image or one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageResult {
    pub name: String,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ImageResult {
    pub fn new(name: impl Into<String>, red: u8, green: u8, blue: u8) -> Self {
        Self {
            name: name.into(),
            red,
            green,
            blue,
        }
    }

    pub fn from_color(name: impl Into<String>, color: [u8; 3]) -> Self {
        let [red, green, blue] = color;
        Self::new(name, red, green, blue)
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl Display for ImageResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.name, self.red, self.green, self.blue
        )
    }
}

/// Per-channel sums used to build a truncating mean.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorAccumulator {
    red: u64,
    green: u64,
    blue: u64,
    count: u64,
}

impl ColorAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, red: u8, green: u8, blue: u8) {
        self.red += u64::from(red);
        self.green += u64::from(green);
        self.blue += u64::from(blue);
        self.count += 1;
    }

    pub fn push_result(&mut self, result: &ImageResult) {
        self.push(result.red, result.green, result.blue);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Integer mean of every pushed color, `None` if nothing was pushed.
    pub fn average(&self) -> Option<[u8; 3]> {
        if self.count == 0 {
            return None;
        }
        // each sum holds at most count * 255, so every quotient fits into u8
        Some([
            (self.red / self.count) as u8,
            (self.green / self.count) as u8,
            (self.blue / self.count) as u8,
        ])
    }
}

impl<'a> FromIterator<&'a ImageResult> for ColorAccumulator {
    fn from_iter<I: IntoIterator<Item = &'a ImageResult>>(iter: I) -> Self {
        let mut accumulator = ColorAccumulator::new();
        for result in iter {
            accumulator.push_result(result);
        }
        accumulator
    }
}
