#![no_main]

use bevy_smooth_normals::{SmoothingConfig, smooth_normals};
use bevy_smooth_normals_fuzz::Mesh;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Mesh, bool)| {
    let (mesh, remap) = input;
    let config = SmoothingConfig::default().with_remap_to_unit_range(remap);

    let smoothed = smooth_normals(&mesh.positions, &mesh.normals, &config)
        .expect("positions and normals are aligned");

    mesh.assert_valid(&smoothed, remap);

    let again = smooth_normals(&mesh.positions, &mesh.normals, &config).unwrap();
    assert_eq!(
        smoothed.iter().flatten().map(|c| c.to_bits()).collect::<Vec<_>>(),
        again.iter().flatten().map(|c| c.to_bits()).collect::<Vec<_>>(),
    );
});
