// tests/fit_integration_tests.rs
//! Integration tests for fitting and drawing through a recording backend

use glyphline::dummy_backend::{DrawCall, DummyBackend, DummyFont, RecordingSurface};
use glyphline::{
    fit_text, FontBackend, FontHandle, Justify, Rect, TextColor, TextContext, TextDrawRequest,
    TextError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn context() -> TextContext<DummyBackend> {
    TextContext::new(DummyBackend::new().with_ellipsis_advance(20)).unwrap()
}

fn draw(
    ctx: &TextContext<DummyBackend>,
    request: &TextDrawRequest<'_, DummyFont>,
) -> Vec<DrawCall> {
    let mut surface = RecordingSurface::new();
    ctx.draw(&mut surface, request);
    surface.calls
}

fn open(ctx: &TextContext<DummyBackend>) -> FontHandle<DummyFont> {
    ctx.open_font("Sans-10").unwrap()
}

#[test]
fn test_fitting_string_drawn_unmodified() {
    let ctx = context();
    let font = open(&ctx);
    let request = TextDrawRequest::new(&font, "fits", Rect::new(0, 0, 100, 14));

    let calls = draw(&ctx, &request);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].text, "fits");
    assert!(!ctx.layout(&request).unwrap().truncated);
}

#[test]
fn test_hello_world_example() {
    let ctx = context();
    let font = open(&ctx);
    let request = TextDrawRequest::new(&font, "HELLO WORLD", Rect::new(0, 0, 50, 14));

    let calls = draw(&ctx, &request);
    assert_eq!(calls.len(), 1);
    let text = &calls[0].text;
    assert_eq!(text, "HE...D");
    assert!(text.starts_with('H') && text.ends_with('D'));

    let layout = ctx.layout(&request).unwrap();
    assert!(layout.width <= 50);
}

#[test]
fn test_justification_through_draw() {
    let ctx = context();
    let font = open(&ctx);
    let rect = Rect::new(7, 0, 100, 14);

    let x_for = |justify| {
        let request = TextDrawRequest::new(&font, "abcde", rect).with_justify(justify);
        draw(&ctx, &request)[0].x
    };
    assert_eq!(x_for(Justify::Left), 7);
    assert_eq!(x_for(Justify::Right), 7 + 100 - 50);
    assert_eq!(x_for(Justify::Center), 7 + 25);
}

#[test]
fn test_justification_counts_shadow_in_width() {
    let ctx = context();
    let font = open(&ctx);
    let request = TextDrawRequest::new(&font, "abcde", Rect::new(0, 0, 100, 14))
        .with_shadow(4, 30)
        .with_justify(Justify::Right);

    let calls = draw(&ctx, &request);
    // foreground is the second call; width 50 + 4 shadow
    assert_eq!(calls[1].x, 100 - 54);
    assert_eq!(calls[0].x, calls[1].x + 4);
}

#[test]
fn test_shadow_only_when_enabled_and_first() {
    let ctx = context();
    let font = open(&ctx);
    let rect = Rect::new(0, 0, 100, 14);

    let plain = draw(&ctx, &TextDrawRequest::new(&font, "abc", rect));
    assert_eq!(plain.len(), 1);

    let shadowed = draw(&ctx, &TextDrawRequest::new(&font, "abc", rect).with_shadow(3, -40));
    assert_eq!(shadowed.len(), 2);
    let (shadow, text) = (&shadowed[0], &shadowed[1]);
    assert_eq!((shadow.x, shadow.y), (text.x + 3, text.y + 3));
    // light shadow: gray level and alpha both 40%
    let level = (0xffff_u32 * 40 / 100) as u16;
    assert_eq!(shadow.color.red, level);
    assert_eq!(shadow.color.alpha, level);
    assert_eq!(shadow.color.pixel, ctx.backend().white_pixel());
}

#[test]
fn test_foreground_always_opaque() {
    let ctx = context();
    let font = open(&ctx);
    let request = TextDrawRequest::new(&font, "abc", Rect::new(0, 0, 100, 14))
        .with_color(TextColor::rgb(10, 20, 30));
    let calls = draw(&ctx, &request);
    assert_eq!(calls[0].color.alpha, 0xffff);
    assert_eq!(calls[0].color.blue, 30 << 8 | 30);
}

#[test]
fn test_narrow_rect_draws_nothing() {
    let ctx = context();
    let font = open(&ctx);
    // Ellipsis (20) can't fit in 15, so it is dropped and nothing fits
    let request = TextDrawRequest::new(&font, "abcdef", Rect::new(0, 0, 15, 14)).with_shadow(1, 50);
    assert!(draw(&ctx, &request).is_empty());
}

#[test]
fn test_empty_string_draws_nothing() {
    let ctx = context();
    let font = open(&ctx);
    let request = TextDrawRequest::new(&font, "", Rect::new(0, 0, 100, 14)).with_shadow(1, 50);
    assert!(draw(&ctx, &request).is_empty());
}

#[test]
fn test_vertical_centering() {
    let backend = DummyBackend::new().with_metrics(12, 3, 14);
    let ctx = TextContext::new(backend).unwrap();
    let font = ctx.open_font("Sans").unwrap();

    // (2 * 15 - (14 + 40) - 1) / 2 = -12, so the box moves down 12px
    let calls = draw(&ctx, &TextDrawRequest::new(&font, "a", Rect::new(0, 100, 100, 40)));
    assert_eq!(calls[0].y, 100 + 12 + 12);
}

#[test]
fn test_both_fonts_missing_is_fatal() {
    let backend = DummyBackend::new().failing("Nope-10").failing("sans");
    let ctx = TextContext::new(backend).unwrap();
    match ctx.open_font("Nope-10") {
        Err(err @ TextError::NoUsableFont { .. }) => assert_eq!(err.exit_code(), 3),
        other => panic!("expected NoUsableFont, got {:?}", other.map(|f| f.descriptor().to_string())),
    }
}

#[test]
fn test_random_strings_fit_or_vanish() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let alphabet: Vec<char> = "abcdefghij KLMNOP éüß漢字".chars().collect();

    for _ in 0..500 {
        let len = rng.random_range(0..40);
        let text: String = (0..len)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())])
            .collect();
        let rect_width = rng.random_range(0..300);
        let shadow = rng.random_range(0..4);
        let advance = |s: &str| s.chars().map(|c| if c.is_ascii() { 7 } else { 12 }).sum::<i32>();

        let fitted = fit_text(&text, rect_width, shadow, 21, advance);

        if advance(&text) + shadow <= rect_width {
            assert_eq!(fitted.text, text);
            assert!(!fitted.truncated);
            continue;
        }
        if fitted.truncated {
            assert!(fitted.text.contains("..."));
            // Only the all-removed case may still overflow
            assert!(fitted.width <= rect_width || fitted.text == "...", "{fitted:?} in {rect_width}");
        } else {
            assert!(fitted.is_empty() || fitted.width <= rect_width);
        }
        if 21 + shadow > rect_width {
            assert!(!fitted.text.contains("..."));
        }
        assert_eq!(fitted.chars, fitted.text.chars().count());
    }
}
