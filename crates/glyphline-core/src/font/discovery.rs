//! System font discovery for the fontdue backend

use std::path::{Path, PathBuf};

use crate::font::*;

/// Platform font directories, user directories included
pub fn default_search_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);

    #[cfg(target_os = "macos")]
    let (system, user): (&[&str], &[&str]) =
        (&["/System/Library/Fonts", "/Library/Fonts"], &["Library/Fonts"]);

    #[cfg(target_os = "windows")]
    let (system, user): (&[&str], &[&str]) = (&["C:\\Windows\\Fonts"], &[]);

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let (system, user): (&[&str], &[&str]) = (
        &["/usr/share/fonts", "/usr/local/share/fonts"],
        &[".fonts", ".local/share/fonts"],
    );

    let mut paths: Vec<PathBuf> = system.iter().map(PathBuf::from).collect();
    if let Some(home) = home {
        paths.extend(user.iter().map(|p| home.join(p)));
    }
    paths
}

/// Scan `search_paths` recursively for font files
///
/// Unreadable directories are skipped. Family, weight and slant are taken
/// from the file name (`DejaVuSans-BoldOblique.ttf`), which is enough to
/// match descriptors without parsing every font on the system.
pub fn discover_fonts(search_paths: &[PathBuf]) -> Vec<SystemFont> {
    let mut fonts = Vec::new();
    let mut pending: Vec<PathBuf> = search_paths.to_vec();

    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::trace!("Skipping font directory {}: {}", dir.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
            } else if is_font_file(&path) {
                if let Some(font) = analyze_font_file(&path) {
                    fonts.push(font);
                }
            }
        }
    }

    tracing::debug!("Discovered {} font files", fonts.len());
    fonts
}

/// Ask fontconfig for the file best matching `descriptor`
///
/// Fontconfig always answers with its closest font; answers from an
/// unrelated family are treated as no match so the caller's fallback runs.
#[cfg(all(target_os = "linux", feature = "font-discovery"))]
pub fn find_with_fontconfig(descriptor: &FontDescriptor) -> Option<SystemFont> {
    let fc = match fontconfig::Fontconfig::new() {
        Some(fc) => fc,
        None => {
            tracing::warn!("Fontconfig initialization failed");
            return None;
        }
    };

    for family in &descriptor.families {
        let Some(found) = fc.find(family, descriptor.style()) else {
            continue;
        };
        if !super::matching::family_matches(family, &found.name) {
            tracing::debug!("Fontconfig offered {:?} for {:?}, ignoring", found.name, family);
            continue;
        }
        return Some(SystemFont {
            name: found.name,
            path: found.path,
            weight: descriptor.weight,
            slant: descriptor.slant,
        });
    }
    None
}

/// Fontconfig is unavailable here, descriptors resolve by scanning only
#[cfg(not(all(target_os = "linux", feature = "font-discovery")))]
pub fn find_with_fontconfig(_descriptor: &FontDescriptor) -> Option<SystemFont> {
    None
}

/// Check if a file is likely a font file fontdue can read
fn is_font_file(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"),
        None => false,
    }
}

/// Derive family and style from the file name
fn analyze_font_file(path: &Path) -> Option<SystemFont> {
    let stem = path.file_stem()?.to_str()?;
    let (family, style) = match stem.split_once('-') {
        Some((family, style)) => (family, style.to_ascii_lowercase()),
        None => (stem, String::new()),
    };
    if family.is_empty() {
        return None;
    }

    let weight = if style.contains("bold") || style.contains("black") || style.contains("heavy") {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    };
    let slant = if style.contains("italic") || style.contains("oblique") {
        FontSlant::Italic
    } else {
        FontSlant::Normal
    };

    Some(SystemFont {
        name: family.to_string(),
        path: path.to_path_buf(),
        weight,
        slant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_file_detection() {
        assert!(is_font_file(Path::new("/fonts/DejaVuSans.ttf")));
        assert!(is_font_file(Path::new("/fonts/Foo.OTF")));
        assert!(!is_font_file(Path::new("/fonts/readme.txt")));
        assert!(!is_font_file(Path::new("/fonts/noext")));
    }

    #[test]
    fn test_style_from_file_name() {
        let f = analyze_font_file(Path::new("/f/DejaVuSans-BoldOblique.ttf")).unwrap();
        assert_eq!(f.name, "DejaVuSans");
        assert_eq!(f.weight, FontWeight::Bold);
        assert_eq!(f.slant, FontSlant::Italic);

        let f = analyze_font_file(Path::new("/f/LiberationMono.ttf")).unwrap();
        assert_eq!(f.name, "LiberationMono");
        assert_eq!(f.weight, FontWeight::Normal);
        assert_eq!(f.slant, FontSlant::Normal);
    }

    #[test]
    fn test_discovery_walks_subdirectories() {
        let root = std::env::temp_dir().join(format!("glyphline-discovery-{}", std::process::id()));
        let nested = root.join("truetype").join("dejavu");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("DejaVuSans.ttf"), b"not really a font").unwrap();
        std::fs::write(root.join("notes.txt"), b"ignored").unwrap();

        let fonts = discover_fonts(&[root.clone(), root.join("missing")]);
        std::fs::remove_dir_all(&root).unwrap();

        assert_eq!(fonts.len(), 1);
        assert_eq!(fonts[0].name, "DejaVuSans");
    }

    #[test]
    fn test_default_search_paths_not_empty() {
        assert!(!default_search_paths().is_empty());
    }
}
