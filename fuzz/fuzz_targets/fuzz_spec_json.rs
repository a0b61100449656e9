#![no_main]

use framecull_engine::{classify, EvalOptions};
use framecull_spec::validation::validate_specification;
use framecull_spec::Specification;
use image::{Rgb, RgbImage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(spec) = Specification::from_slice(data) else {
        return;
    };

    let _ = validate_specification(&spec);

    let mut frame = RgbImage::from_pixel(8, 6, Rgb([255, 255, 255]));
    frame.put_pixel(0, 0, Rgb([0, 0, 0]));

    let specs = [spec];
    let quiet = classify(&specs, &frame, &EvalOptions::default());
    let verbose = classify(&specs, &frame, &EvalOptions::with_diagnostics());
    assert_eq!(quiet.accepted, verbose.accepted);
});
