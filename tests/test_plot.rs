use std::io::Read;

use approx::assert_relative_eq;
use ggseg::{
    palette, plot_aseg, plot_surface, plot_view, render_svg, save_svg, AtlasTable, ColorResolution, GgsegError, Guide,
    Hemi, Layer, MultiPolygon, PlotOptions, RegionRecord, Side, Value, MASK_GRAY,
};

fn square(x: f64, y: f64) -> MultiPolygon {
    MultiPolygon::from_rings(vec![vec![vec![[x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0]]]])
}

/// Cortical table with scores -2..2 spread round-robin over three of the four views. The medial
/// side of the right hemisphere has no records.
fn surface_table() -> AtlasTable {
    let combos = [(Side::Lateral, Hemi::Left), (Side::Lateral, Hemi::Right), (Side::Medial, Hemi::Left)];
    let scores = [-2.0, -1.0, 0.0, 1.0, 2.0];
    let recs = scores
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let (side, hemi) = combos[i % combos.len()];
            let region = format!("region{}", i);
            RegionRecord::new(square(i as f64, 0.0), side, hemi, Some(region.as_str()), Some(region.as_str())).with_value("score", *s)
        })
        .collect();
    AtlasTable::new(recs)
}

fn aseg_table() -> AtlasTable {
    let recs = vec![
        RegionRecord::new(square(0.0, 0.0), Side::Coronal, Hemi::Left, Some("thalamus"), Some("Left-Thalamus")).with_value("score", 1.0),
        RegionRecord::new(square(2.0, 0.0), Side::Coronal, Hemi::Right, Some("thalamus"), Some("Right-Thalamus")).with_value("score", 3.0),
        RegionRecord::new(square(0.0, 2.0), Side::Coronal, Hemi::Midline, None, None).with_value("score", 3.0),
        RegionRecord::new(square(0.0, 0.0), Side::Sagittal, Hemi::Midline, Some("brain stem"), Some("Brain-Stem")).with_value("score", 3.0),
        RegionRecord::new(square(1.0, 0.0), Side::Sagittal, Hemi::Midline, None, None),
    ];
    let mut table = AtlasTable::new(recs);
    table.derive_roi();
    table
}


#[test]
fn surface_plot_has_four_panels_and_a_blank_one() {
    let table = surface_table();
    let (fig, panels) = plot_surface(&table, "score", &PlotOptions::surface().palette("RdBu")).unwrap();

    assert_eq!((2, 2), (fig.rows, fig.cols));
    assert_eq!(2, fig[panels[0]].shapes.len());
    assert_eq!(2, fig[panels[1]].shapes.len());
    assert_eq!(1, fig[panels[2]].shapes.len());
    assert!(fig[panels[3]].is_empty());
    assert!(fig.panels().iter().all(|p| !p.axis_visible));
    assert!(fig.guide().is_none());
}

#[test]
fn opposite_scores_map_to_opposite_palette_ends() {
    let table = surface_table();
    let (fig, panels) = plot_surface(&table, "score", &PlotOptions::surface().palette("RdBu").show_guide(true)).unwrap();
    let rdbu = palette::named("RdBu").unwrap();

    // region0 holds -2 (lateral left), region4 holds 2 (lateral right)
    assert_eq!(Some(Some(rdbu.sample(0.0))), fig[panels[0]].visible_fill("region0"));
    assert_eq!(Some(Some(rdbu.sample(1.0))), fig[panels[1]].visible_fill("region4"));
    assert_eq!(Some(Some(rdbu.sample(0.5))), fig[panels[2]].visible_fill("region2"));

    match fig.guide() {
        Some(Guide::Colorbar { low, high, .. }) => {
            assert_relative_eq!(-2.0, *low);
            assert_relative_eq!(2.0, *high);
        }
        other => panic!("expected a colorbar, got {:?}", other),
    }

    let column = table.column("score").unwrap();
    match ggseg::resolve(&column, rdbu, None, None) {
        ColorResolution::Numeric { norm, .. } => {
            let lo = norm.normalize(-2.0).unwrap();
            let hi = norm.normalize(2.0).unwrap();
            assert_relative_eq!(0.5 - lo, hi - 0.5);
            assert_relative_eq!(0.5, norm.normalize(0.0).unwrap());
        }
        ColorResolution::Categorical { .. } => panic!("scores are numeric"),
    }
}

#[test]
fn equal_values_get_equal_colors_across_panels() {
    let table = aseg_table();
    let (fig, panels) = plot_aseg(&table, "score", &PlotOptions::aseg().mask_region(None)).unwrap();

    // score 3 appears on the coronal right thalamus and on the sagittal brain stem, the range is 1..3
    let viridis = palette::named("viridis").unwrap();
    let coronal = &fig[panels[0]];
    let sagittal = &fig[panels[1]];
    assert_eq!(2, coronal.shapes.len());
    assert_eq!(Some(viridis.sample(0.0)), coronal.shapes[0].fill);
    assert_eq!(Some(viridis.sample(1.0)), coronal.shapes[1].fill);
    assert_eq!(Some(coronal.shapes[1].fill), sagittal.visible_fill("brain stem"));
    assert_eq!(Some(None), sagittal.visible_fill("???"));
}

#[test]
fn aseg_masks_the_unknown_region_in_gray() {
    let table = aseg_table();
    let (fig, panels) = plot_aseg(&table, "score", &PlotOptions::aseg()).unwrap();

    let coronal = &fig[panels[0]];
    assert_eq!(Some(Some(MASK_GRAY)), coronal.visible_fill("???"));
    assert_eq!(1, coronal.shapes.iter().filter(|s| s.layer == Layer::Mask).count());
    // the coronal view selects left and right only; the midline background shape enters through the mask
    assert_eq!(3, coronal.shapes.len());

    let sagittal = &fig[panels[1]];
    assert_eq!(Some(Some(MASK_GRAY)), sagittal.visible_fill("???"));

    match fig.guide() {
        Some(Guide::Colorbar { title, .. }) => assert_eq!("score", title),
        other => panic!("expected a colorbar, got {:?}", other),
    }
}

#[test]
fn aseg_labels_are_plotted_as_categories_with_a_legend() {
    let table = aseg_table();
    let (fig, _) = plot_aseg(&table, "label", &PlotOptions::aseg()).unwrap();
    match fig.guide() {
        Some(Guide::Legend { title, entries, .. }) => {
            assert_eq!("label", title);
            let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
            assert_eq!(vec!["???", "Brain-Stem", "Left-Thalamus", "Right-Thalamus"], labels);
        }
        other => panic!("expected a legend, got {:?}", other),
    }
    assert_eq!(Value::Text("midline_???".to_string()), table.records[2].value("roi"));
}

#[test]
fn a_view_without_records_gives_an_empty_panel() {
    let table = aseg_table();
    let (fig, panel) = plot_view(&table, Side::Lateral, Hemi::Left, "score", &PlotOptions::view()).unwrap();
    assert_eq!((1, 1), (fig.rows, fig.cols));
    assert!(fig[panel].is_empty());
    assert!(!fig[panel].axis_visible);
}

#[test]
fn missing_columns_fail_before_drawing() {
    let table = surface_table();
    match plot_surface(&table, "thickness", &PlotOptions::surface()) {
        Err(GgsegError::MissingColumn(col)) => assert_eq!("thickness", col),
        other => panic!("expected a schema error, got {:?}", other.map(|(f, _)| f.to_string())),
    }
}

#[test]
fn figures_export_to_plain_and_compressed_svg() {
    let table = surface_table();
    let (fig, _) = plot_surface(&table, "score", &PlotOptions::surface().show_guide(true)).unwrap();

    let svg = render_svg(&fig).unwrap();
    let filled: usize = fig.panels().iter().flat_map(|p| p.shapes.iter()).filter(|s| s.fill.is_some()).map(|s| s.geometry.polygons.len()).sum();
    assert_eq!(5, filled);
    assert_eq!(filled, svg.matches("<polygon").count());

    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("surface.svg");
    let packed = dir.path().join("surface.svgz");
    save_svg(&fig, &plain).unwrap();
    save_svg(&fig, &packed).unwrap();

    assert_eq!(svg, std::fs::read_to_string(&plain).unwrap());
    let bytes = std::fs::read(&packed).unwrap();
    assert_eq!(&[0x1f, 0x8b], &bytes[..2]);

    let mut unpacked = String::new();
    flate2::read::GzDecoder::new(&bytes[..]).read_to_string(&mut unpacked).unwrap();
    assert_eq!(svg, unpacked);
}
