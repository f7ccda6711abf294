#![no_main]

use bevy_smooth_normals::{
    PositionGroups, SmoothingConfig, StdOps, angle_between, smooth_normals,
};
use bevy_smooth_normals_fuzz::Mesh;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Mesh, f32)| {
    let (mesh, angular_threshold) = input;
    if !angular_threshold.is_finite() {
        return;
    }
    let angular_threshold = angular_threshold % 180.;

    let config = SmoothingConfig::default().with_angle_threshold(angular_threshold);
    let smoothed = smooth_normals(&mesh.positions, &mesh.normals, &config).unwrap();

    mesh.assert_valid(&smoothed, false);

    // A vertex isolated from every neighbor by the threshold keeps its own
    // direction.
    let groups = PositionGroups::build(&mesh.positions);
    for (vertex, value) in smoothed.iter().enumerate() {
        let normal = mesh.normals[vertex];
        let isolated = groups
            .group(vertex)
            .iter()
            .map(|&other| other as usize)
            .filter(|&other| other != vertex)
            .all(|other| angle_between::<StdOps>(normal, mesh.normals[other]) > angular_threshold);

        let length_squared = normal.iter().map(|c| c * c).sum::<f32>();
        if isolated && angular_threshold >= 0. && length_squared > 1e-6 {
            assert!(angle_between::<StdOps>(normal, *value) < 0.1, "{normal:?} -> {value:?}");
        }
    }
});
