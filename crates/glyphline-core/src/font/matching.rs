//! Picking a discovered font file for a descriptor

use crate::font::*;

/// Best match for `descriptor` among `fonts`
///
/// Returns `None` when no font matches any of the descriptor's families, so
/// a caller can move on to its fallback descriptor.
pub fn match_descriptor<'a>(
    descriptor: &FontDescriptor,
    fonts: &'a [SystemFont],
) -> Option<&'a SystemFont> {
    let mut best: Option<(f64, &SystemFont)> = None;

    for font in fonts {
        let score = score_font(descriptor, font);
        if score <= 0.0 {
            continue;
        }
        // Ties keep the first candidate, so the result doesn't depend on sort order
        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, font));
        }
    }

    best.map(|(_, font)| font)
}

/// Suitability of `font` for `descriptor`, zero when the family doesn't match
///
/// Earlier families in the descriptor's list score higher. Weight and slant
/// only break ties between files of a matching family.
pub fn score_font(descriptor: &FontDescriptor, font: &SystemFont) -> f64 {
    let name = normalize(&font.name);
    let count = descriptor.families.len();

    let family_score = descriptor
        .families
        .iter()
        .enumerate()
        .map(|(i, family)| family_score(family, &name) * (count - i) as f64)
        .fold(0.0, f64::max);

    if family_score <= 0.0 {
        return 0.0;
    }

    let mut score = family_score;
    if font.weight == descriptor.weight {
        score += 50.0;
    }
    if font.slant == descriptor.slant {
        score += 50.0;
    }
    score
}

/// True when `font_name` is an acceptable answer for a request for `family`
pub(crate) fn family_matches(family: &str, font_name: &str) -> bool {
    family_score(family, &normalize(font_name)) > 0.0
}

fn family_score(family: &str, normalized_name: &str) -> f64 {
    let wanted = normalize(family);
    if wanted.is_empty() {
        return 0.0;
    }

    if normalized_name == wanted {
        return 1000.0;
    }

    match wanted.as_str() {
        "sans" | "sansserif" => {
            if normalized_name.contains("sans") && !is_monospace_font(normalized_name) {
                300.0
            } else {
                0.0
            }
        }
        "serif" => {
            if normalized_name.contains("serif") && !normalized_name.contains("sans") {
                300.0
            } else {
                0.0
            }
        }
        "mono" | "monospace" => {
            if is_monospace_font(normalized_name) {
                300.0
            } else {
                0.0
            }
        }
        _ if normalized_name.starts_with(&wanted) => 500.0,
        _ => 0.0,
    }
}

/// Lowercase with spaces and punctuation dropped, `DejaVu Sans` == `DejaVuSans`
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Check if a normalized font name indicates monospace characteristics
fn is_monospace_font(name: &str) -> bool {
    ["mono", "typewriter", "console", "terminal", "code", "fixed", "courier", "menlo", "consolas"]
        .iter()
        .any(|hint| name.contains(hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font(name: &str, weight: FontWeight, slant: FontSlant) -> SystemFont {
        SystemFont {
            name: name.to_string(),
            path: format!("/usr/share/fonts/{name}.ttf").into(),
            weight,
            slant,
        }
    }

    fn system_fonts() -> Vec<SystemFont> {
        vec![
            font("DejaVuSansMono", FontWeight::Normal, FontSlant::Normal),
            font("DejaVuSans", FontWeight::Bold, FontSlant::Normal),
            font("DejaVuSans", FontWeight::Normal, FontSlant::Normal),
            font("DejaVuSerif", FontWeight::Normal, FontSlant::Normal),
        ]
    }

    #[test]
    fn test_exact_family_wins() {
        let fonts = system_fonts();
        let d = FontDescriptor::parse("DejaVu Sans Mono-10").unwrap();
        assert_eq!(match_descriptor(&d, &fonts).unwrap().name, "DejaVuSansMono");
    }

    #[test]
    fn test_weight_breaks_ties() {
        let fonts = system_fonts();
        let d = FontDescriptor::parse("DejaVu Sans:bold").unwrap();
        let m = match_descriptor(&d, &fonts).unwrap();
        assert_eq!((m.name.as_str(), m.weight), ("DejaVuSans", FontWeight::Bold));

        let d = FontDescriptor::parse("DejaVu Sans").unwrap();
        let m = match_descriptor(&d, &fonts).unwrap();
        assert_eq!(m.weight, FontWeight::Normal);
    }

    #[test]
    fn test_generic_families() {
        let fonts = system_fonts();
        let sans = match_descriptor(&FontDescriptor::parse("sans").unwrap(), &fonts).unwrap();
        assert_eq!(sans.name, "DejaVuSans");
        let serif = match_descriptor(&FontDescriptor::parse("serif").unwrap(), &fonts).unwrap();
        assert_eq!(serif.name, "DejaVuSerif");
        let mono = match_descriptor(&FontDescriptor::parse("monospace").unwrap(), &fonts).unwrap();
        assert_eq!(mono.name, "DejaVuSansMono");
    }

    #[test]
    fn test_unknown_family_has_no_match() {
        let fonts = system_fonts();
        let d = FontDescriptor::parse("Comic Neue-10").unwrap();
        assert!(match_descriptor(&d, &fonts).is_none());
        assert!(match_descriptor(&d, &[]).is_none());
    }

    #[test]
    fn test_family_matches_real_names() {
        assert!(family_matches("DejaVu Sans", "DejaVu Sans"));
        assert!(family_matches("sans", "DejaVu Sans"));
        assert!(family_matches("monospace", "Liberation Mono"));
        assert!(!family_matches("Xyzzy", "DejaVu Sans"));
    }

    #[test]
    fn test_family_list_order_matters() {
        let fonts = system_fonts();
        let d = FontDescriptor::parse("Nope,DejaVu Serif,DejaVu Sans").unwrap();
        assert_eq!(match_descriptor(&d, &fonts).unwrap().name, "DejaVuSerif");
    }
}
