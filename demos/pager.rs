//! Swiping between pages with a single progress value.
//!
//! Progress runs from -1 (swiped fully left) to 1 (swiped fully right). With
//! re-enable turned on only the controllers facing the swipe direction run.
//!
//! ```bash
//! RUST_LOG=transit=debug TRANSIT_PRINT_ON_END=1 cargo run --example pager
//! ```

use transit::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let page = Element::leaf("page", Size::new(360.0, 640.0));

    let swipe = transit_target(page.clone())
        .id("pager")
        .add_setup(|set, _| {
            // dragging right pushes the page out to the right and fades it
            let right = ProgressController::new(vec![
                PropertyRange::scalar(Property::Alpha, 1.0, 0.3),
                PropertyRange::scalar(Property::Rotation, 0.0, 8.0),
            ])?
            .with_window(ProgressWindow::new(0.0, 1.0));
            // dragging left shrinks it in place
            let left = ProgressController::new(vec![
                PropertyRange::scalar(Property::ScaleX, 1.0, 0.85),
                PropertyRange::scalar(Property::ScaleY, 1.0, 0.85),
            ])?
            .with_window(ProgressWindow::new(0.0, -1.0));
            set.add_controller(right);
            set.add_controller(left);
            Ok(())
        })
        .delay_translation_x_of_width(1.0)
        .interpolator(Interpolator::EaseOut);

    let mut transition = swipe
        .create_transition()
        .with_config(TransitConfig::from_env());
    transition.set_reenable(true);

    for progress in [0.0, 0.25, 0.5, 0.5, -0.25, -0.75, 1.0] {
        transition.update_progress(progress)?;
        println!(
            "progress {:>5.2}: alpha {:.2} rotation {:>4.1} scale {:.2} translationX {:>6.1}",
            progress,
            page.scalar(Property::Alpha).unwrap_or_default(),
            page.scalar(Property::Rotation).unwrap_or_default(),
            page.scalar(Property::ScaleX).unwrap_or_default(),
            page.scalar(Property::TranslationX).unwrap_or_default(),
        );
    }
    transition.end()?;

    let changes = page.take_changes();
    println!("needs layout: {}", changes.contains(ChangeFlags::NEEDS_LAYOUT));
    Ok(())
}
