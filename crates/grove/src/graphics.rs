//! Colors and fonts attached to rows and cells.
//!
//! These are plain descriptions handed to the rendering backend; Grove never
//! rasterizes anything itself.

use serde::{Deserialize, Serialize};

use crate::error::{ItemError, Result};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Font weight and slant flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
}

/// A font description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    family: String,
    size: f32,
    style: FontStyle,
}

impl Font {
    /// Describe a font.
    ///
    /// Fails with [`ItemError::NullArgument`] for an empty family name and
    /// [`ItemError::InvalidArgument`] for a non-positive or non-finite size.
    pub fn new(family: impl Into<String>, size: f32) -> Result<Self> {
        let family = family.into();
        if family.trim().is_empty() {
            return Err(ItemError::NullArgument("font family"));
        }
        if !size.is_finite() || size <= 0.0 {
            return Err(ItemError::invalid(format!("font size {size} must be positive")));
        }
        Ok(Self {
            family,
            size,
            style: FontStyle::default(),
        })
    }

    /// Set bold.
    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    /// Set italic.
    pub fn italic(mut self) -> Self {
        self.style.italic = true;
        self
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }
}
