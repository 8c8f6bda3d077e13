//! Test utilities shared by the sprite analyzer crates.
//!
//! This provides a runner for table-driven tests ([`TestCases`]) and helpers
//! for building small RGBA sprites from ASCII art ([`sprite_from_ascii`]).

use std::fmt::Debug;
use std::panic::{RefUnwindSafe, UnwindSafe};

/// Runner for parametrized (aka. table-driven) tests.
///
/// To write a table-driven test, define a `Debug` struct named `Case` holding
/// the inputs and expected outputs of one case, build a collection of them
/// named `cases` and call `cases.test_each` with the test body as a closure.
///
/// Every case is run, even if earlier ones fail. Panics are caught and once
/// all cases have run, `test_each` panics with the number of failures and the
/// debug representation of each failing case.
///
/// ## Example
///
/// ```
/// use sprite_testing::TestCases;
///
/// // Add #[test] attribute
/// fn test_add() {
///   #[derive(Debug)]
///   struct Case {
///     a: i32,
///     b: i32,
///     expected: i32,
///   }
///
///   let cases = [
///     Case { a: 3, b: 5, expected: 8 },
///   ];
///
///   cases.test_each(|&Case { a, b, expected }| {
///     assert_eq!(a + b, expected);
///   });
/// }
/// # test_add();
/// ```
///
/// ## Unwind safety
///
/// Cases and values captured by the test closure must be
/// [unwind safe](https://doc.rust-lang.org/std/panic/fn.catch_unwind.html).
/// Values with interior mutability should be created inside the closure, or
/// wrapped in [`AssertUnwindSafe`](std::panic::AssertUnwindSafe).
pub trait TestCases {
    /// The data for a single test case.
    type Case;

    /// Call `test` with a reference to each case, catching any panics.
    fn test_each(self, test: impl Fn(&Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe;

    /// Variant of [`test_each`](TestCases::test_each) which passes cases by
    /// value.
    ///
    /// Each case is formatted before the test runs so that it can still be
    /// reported if the test panics.
    fn test_each_value(self, test: impl Fn(Self::Case) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe;
}

impl<I: IntoIterator> TestCases for I {
    type Case = I::Item;

    fn test_each(self, test: impl Fn(&I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + RefUnwindSafe,
    {
        let mut failures = Vec::new();
        for case in self {
            if std::panic::catch_unwind(|| test(&case)).is_err() {
                failures.push(format!("{:?}", case));
            }
        }
        report_failures(&failures);
    }

    fn test_each_value(self, test: impl Fn(I::Item) + RefUnwindSafe)
    where
        Self::Case: Debug + UnwindSafe,
    {
        let mut failures = Vec::new();
        for case in self {
            let test = &test;
            let case_str = format!("{:?}", case);
            if std::panic::catch_unwind(move || test(case)).is_err() {
                failures.push(case_str);
            }
        }
        report_failures(&failures);
    }
}

fn report_failures(failures: &[String]) {
    assert_eq!(
        failures.len(),
        0,
        "{} test cases failed: {:?}",
        failures.len(),
        failures
    );
}

/// Color used for opaque pixels of sprites built by [`sprite_from_ascii`].
pub const OPAQUE_PIXEL: [u8; 4] = [0xCC, 0x44, 0x22, 0xFF];

/// Color used for semi-transparent pixels of sprites built by
/// [`sprite_from_ascii`]. These still count as opaque for shape detection.
pub const TRANSLUCENT_PIXEL: [u8; 4] = [0x20, 0x80, 0x20, 0x01];

/// An RGBA8 image in row-major order, built for tests.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Sprite {
    /// Create a fully transparent sprite.
    pub fn transparent(width: u32, height: u32) -> Sprite {
        Sprite {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Return the alpha value at `(x, y)`.
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[(y * self.width + x) as usize * 4 + 3]
    }

    /// Set the pixel at `(x, y)` to `rgba`.
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = (y * self.width + x) as usize * 4;
        self.data[offset..offset + 4].copy_from_slice(&rgba);
    }

    /// Paint every pixel whose center lies within `radius` of `(cx, cy)`.
    pub fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, rgba: [u8; 4]) {
        for y in 0..self.height {
            for x in 0..self.width {
                let dx = x as f32 - cx;
                let dy = y as f32 - cy;
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(x, y, rgba);
                }
            }
        }
    }
}

/// Build a sprite from rows of ASCII art.
///
/// `#` is an opaque pixel, `+` a barely visible pixel (alpha 1) and every
/// other character is fully transparent. All rows must have the same length.
///
/// ```
/// use sprite_testing::sprite_from_ascii;
///
/// let sprite = sprite_from_ascii(&[
///     "..#",
///     "+##",
/// ]);
/// assert_eq!((sprite.width, sprite.height), (3, 2));
/// assert_eq!(sprite.alpha(0, 0), 0);
/// assert_eq!(sprite.alpha(0, 1), 1);
/// assert_eq!(sprite.alpha(2, 1), 255);
/// ```
pub fn sprite_from_ascii(rows: &[&str]) -> Sprite {
    let height = rows.len() as u32;
    let width = rows.first().map(|row| row.chars().count()).unwrap_or(0) as u32;

    let mut sprite = Sprite::transparent(width, height);
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(
            row.chars().count(),
            width as usize,
            "row {} has a different length",
            y
        );
        for (x, ch) in row.chars().enumerate() {
            let rgba = match ch {
                '#' => OPAQUE_PIXEL,
                '+' => TRANSLUCENT_PIXEL,
                _ => continue,
            };
            sprite.set_pixel(x as u32, y as u32, rgba);
        }
    }
    sprite
}
