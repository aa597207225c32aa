//! A list whose rows fade in one after another as the list scrolls, with a
//! header that slides up by its own height and shifts hue.
//!
//! ```bash
//! RUST_LOG=transit=debug cargo run --example scroll_fade
//! ```

use transit::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let rows: Vec<TargetRef> = (0..4)
        .map(|i| Element::leaf(format!("row{}", i), Size::new(320.0, 48.0)) as TargetRef)
        .collect();
    let list = Element::container("list", Size::new(320.0, 192.0), rows.clone());
    let header = Element::leaf("header", Size::new(320.0, 56.0));

    let mut rows_in = transit_target(list.clone())
        .transit_group(|builder, child| {
            let step = 1.0 / child.total as f32;
            let start = step * child.index as f32;
            Ok(builder
                .alpha(0.0, 1.0)
                .translation_y(24.0, 0.0)
                .range(start, start + step))
        })?
        .create_transition();

    let mut header_out = transit_target(header.clone())
        .delay_translation_y_of_height(-1.0)
        .background_color_hsv(Color::from_hex(0x3F51B5), Color::from_hex(0xE91E63))
        .range(0.0, 0.5)
        .create_transition();

    // layout settles after the transitions are built
    header.set_size(Size::new(320.0, 64.0));

    for step in 0..=8 {
        let offset = step as f32 / 8.0;
        rows_in.update_progress(offset)?;
        header_out.update_progress(offset)?;

        let alphas: Vec<String> = rows
            .iter()
            .map(|row| {
                let alpha = row
                    .value(Property::Alpha)
                    .and_then(|v| v.as_scalar())
                    .unwrap_or_default();
                format!("{:.2}", alpha)
            })
            .collect();
        let color = header
            .get(Property::BackgroundColor)
            .and_then(|v| v.as_color())
            .unwrap_or_default();
        println!(
            "scroll {:.3}: rows [{}] header y {:>6.1} color #{:08X}",
            offset,
            alphas.join(" "),
            header.scalar(Property::TranslationY).unwrap_or_default(),
            color.to_argb(),
        );
    }

    rows_in.end()?;
    header_out.end()?;
    Ok(())
}
