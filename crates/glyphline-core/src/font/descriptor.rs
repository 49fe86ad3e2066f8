//! Fontconfig-style font names: `Family[,Family]-Size:prop:key=value`

use std::fmt;
use std::str::FromStr;

use crate::constants::FALLBACK_FONT_DESCRIPTOR;
use crate::error::{TextError, TextResult};
use crate::font::{FontSlant, FontWeight};

/// Point size used when a descriptor names none
pub const DEFAULT_POINT_SIZE: f32 = 10.0;

/// A parsed font name
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub families: Vec<String>,
    pub point_size: Option<f32>,
    pub pixel_size: Option<f32>,
    pub weight: FontWeight,
    pub slant: FontSlant,
}

impl FontDescriptor {
    pub fn parse(descriptor: &str) -> TextResult<Self> {
        let invalid = |reason: &str| TextError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason: reason.to_string(),
        };

        let (families, sizes, props) = split_name(descriptor);
        let families: Vec<String> = families
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if families.is_empty() {
            return Err(invalid("no family name"));
        }

        let mut out = FontDescriptor {
            families,
            point_size: None,
            pixel_size: None,
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
        };

        // Only the first of several sizes counts
        if let Some(size) = sizes.first() {
            out.point_size = Some(parse_size(size).ok_or_else(|| invalid("bad size"))?);
        }

        for prop in props {
            let prop = prop.trim();
            match prop.split_once('=') {
                Some((key, value)) => out.apply(key.trim(), value.trim()).map_err(|r| invalid(&r))?,
                None => out.apply_constant(prop),
            }
        }

        Ok(out)
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key.to_ascii_lowercase().as_str() {
            "size" => {
                self.point_size = Some(parse_size(value).ok_or(format!("bad size {value:?}"))?)
            }
            "pixelsize" => {
                self.pixel_size = Some(parse_size(value).ok_or(format!("bad pixelsize {value:?}"))?)
            }
            "weight" => self.weight = parse_weight(value).ok_or(format!("bad weight {value:?}"))?,
            "slant" => self.slant = parse_slant(value).ok_or(format!("bad slant {value:?}"))?,
            "style" => self.apply_constant(value),
            other => tracing::debug!("Ignoring font property {}={}", other, value),
        }
        Ok(())
    }

    fn apply_constant(&mut self, constant: &str) {
        for word in constant.split_whitespace() {
            if let Some(weight) = parse_weight(word) {
                self.weight = weight;
            } else if let Some(slant) = parse_slant(word) {
                self.slant = slant;
            } else {
                tracing::debug!("Ignoring font constant {:?}", word);
            }
        }
    }

    /// First family, or the fallback family when none is listed
    pub fn family(&self) -> &str {
        self.families
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_FONT_DESCRIPTOR)
    }

    /// Pixel size at `dpi`, preferring an explicit pixel size
    pub fn pixels(&self, dpi: f32) -> f32 {
        match (self.pixel_size, self.point_size) {
            (Some(px), _) => px,
            (None, Some(pt)) => pt * dpi / 72.0,
            (None, None) => DEFAULT_POINT_SIZE * dpi / 72.0,
        }
    }

    /// Fontconfig style string, `None` for regular upright
    pub fn style(&self) -> Option<&'static str> {
        match (self.weight, self.slant) {
            (FontWeight::Normal, FontSlant::Normal) => None,
            (FontWeight::Bold, FontSlant::Normal) => Some("Bold"),
            (FontWeight::Normal, FontSlant::Italic) => Some("Italic"),
            (FontWeight::Bold, FontSlant::Italic) => Some("Bold Italic"),
        }
    }
}

impl FromStr for FontDescriptor {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontDescriptor::parse(s)
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let families: Vec<String> = self.families.iter().map(|s| escape(s)).collect();
        write!(f, "{}", families.join(","))?;
        if let Some(pt) = self.point_size {
            write!(f, "-{pt}")?;
        }
        if let Some(px) = self.pixel_size {
            write!(f, ":pixelsize={px}")?;
        }
        if self.weight == FontWeight::Bold {
            write!(f, ":bold")?;
        }
        if self.slant == FontSlant::Italic {
            write!(f, ":italic")?;
        }
        Ok(())
    }
}

/// Split the raw name into families, sizes and properties, honoring `\` escapes
fn split_name(name: &str) -> (Vec<String>, Vec<String>, Vec<String>) {
    #[derive(PartialEq)]
    enum Part {
        Family,
        Size,
        Prop,
    }

    let mut families = vec![String::new()];
    let mut sizes = Vec::new();
    let mut props = Vec::new();
    let mut part = Part::Family;
    let mut chars = name.chars();

    while let Some(ch) = chars.next() {
        let (ch, escaped) = match ch {
            '\\' => match chars.next() {
                Some(next) => (next, true),
                None => break,
            },
            c => (c, false),
        };

        if !escaped {
            match (ch, &part) {
                (':', _) => {
                    part = Part::Prop;
                    props.push(String::new());
                    continue;
                }
                ('-', Part::Family) => {
                    part = Part::Size;
                    sizes.push(String::new());
                    continue;
                }
                (',', Part::Family) => {
                    families.push(String::new());
                    continue;
                }
                (',', Part::Size) => {
                    sizes.push(String::new());
                    continue;
                }
                _ => {}
            }
        }

        let target = match part {
            Part::Family => families.last_mut(),
            Part::Size => sizes.last_mut(),
            Part::Prop => props.last_mut(),
        };
        if let Some(s) = target {
            s.push(ch);
        }
    }

    (families, sizes, props)
}

fn escape(family: &str) -> String {
    let mut out = String::with_capacity(family.len());
    for ch in family.chars() {
        if matches!(ch, '-' | ':' | ',' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn parse_size(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

fn parse_weight(s: &str) -> Option<FontWeight> {
    match s.to_ascii_lowercase().as_str() {
        "thin" | "extralight" | "ultralight" | "light" | "book" | "regular" | "normal"
        | "medium" => Some(FontWeight::Normal),
        "demibold" | "semibold" | "bold" | "extrabold" | "ultrabold" | "black" | "heavy" => {
            Some(FontWeight::Bold)
        }
        numeric => numeric.parse::<u32>().ok().map(|w| {
            if w > 100 {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            }
        }),
    }
}

fn parse_slant(s: &str) -> Option<FontSlant> {
    match s.to_ascii_lowercase().as_str() {
        "roman" | "0" => Some(FontSlant::Normal),
        "italic" | "oblique" | "100" | "110" => Some(FontSlant::Italic),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_and_size() {
        let d = FontDescriptor::parse("DejaVu Sans Mono-12").unwrap();
        assert_eq!(d.families, vec!["DejaVu Sans Mono"]);
        assert_eq!(d.point_size, Some(12.0));
        assert_eq!(d.weight, FontWeight::Normal);
        assert_eq!(d.slant, FontSlant::Normal);
    }

    #[test]
    fn test_bare_family() {
        let d: FontDescriptor = "sans".parse().unwrap();
        assert_eq!(d.family(), "sans");
        assert_eq!(d.point_size, None);
        assert_eq!(d.style(), None);
    }

    #[test]
    fn test_family_list_and_properties() {
        let d = FontDescriptor::parse("Arial,Helvetica-9:bold:slant=italic:pixelsize=14").unwrap();
        assert_eq!(d.families, vec!["Arial", "Helvetica"]);
        assert_eq!(d.point_size, Some(9.0));
        assert_eq!(d.pixel_size, Some(14.0));
        assert_eq!(d.weight, FontWeight::Bold);
        assert_eq!(d.slant, FontSlant::Italic);
        assert_eq!(d.style(), Some("Bold Italic"));
        assert_eq!(d.pixels(96.0), 14.0);
    }

    #[test]
    fn test_numeric_weight_and_style_words() {
        let d = FontDescriptor::parse("Sans:weight=200").unwrap();
        assert_eq!(d.weight, FontWeight::Bold);
        let d = FontDescriptor::parse("Sans:weight=80").unwrap();
        assert_eq!(d.weight, FontWeight::Normal);
        let d = FontDescriptor::parse("Sans:style=Bold Oblique").unwrap();
        assert_eq!(d.style(), Some("Bold Italic"));
    }

    #[test]
    fn test_escaped_dash_stays_in_family() {
        let d = FontDescriptor::parse(r"Foo\-Bar-8").unwrap();
        assert_eq!(d.family(), "Foo-Bar");
        assert_eq!(d.point_size, Some(8.0));
        assert_eq!(d.to_string(), r"Foo\-Bar-8");
    }

    #[test]
    fn test_size_to_pixels() {
        let d = FontDescriptor::parse("Sans-12").unwrap();
        assert_eq!(d.pixels(72.0), 12.0);
        assert_eq!(d.pixels(96.0), 16.0);
        let d = FontDescriptor::parse("Sans").unwrap();
        assert_eq!(d.pixels(72.0), DEFAULT_POINT_SIZE);
    }

    #[test]
    fn test_unknown_properties_are_ignored() {
        let d = FontDescriptor::parse("Sans-10:antialias=true:hinting").unwrap();
        assert_eq!(d.family(), "Sans");
    }

    #[test]
    fn test_invalid_descriptors() {
        assert!(matches!(
            FontDescriptor::parse(""),
            Err(TextError::InvalidDescriptor { .. })
        ));
        assert!(FontDescriptor::parse("-12").is_err());
        assert!(FontDescriptor::parse("Sans-big").is_err());
        assert!(FontDescriptor::parse("Sans:weight=plump").is_err());
    }

    #[test]
    fn test_family_without_families_is_fallback() {
        let mut d = FontDescriptor::parse("Serif-9").unwrap();
        assert_eq!(d.family(), "Serif");
        d.families.clear();
        assert_eq!(d.family(), "sans");
    }
}
