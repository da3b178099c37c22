// benches/grid.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use slam_scrape::bracket::{grid, rounds};

/// Synthesize a 128-draw section table: first-round player rows plus
/// rowspan-heavy carry columns for the later rounds, like the real pages.
fn synth_section() -> String {
    let mut doc = String::with_capacity(256 * 1024);
    doc.push_str("<table>\n<tr>");
    for label in ["First round", "Second round", "Third round", "Fourth round"] {
        doc.push_str(&format!("<th colspan=\"4\">{label}</th>"));
    }
    doc.push_str("</tr>\n");

    for i in 0..128 {
        doc.push_str("<tr>");
        doc.push_str(&format!(
            "<td><a title=\"Player {i}\">Player {i}</a></td><td>6</td><td>6</td><td>6</td>"
        ));
        // carry cells opening at power-of-two boundaries
        if i % 2 == 0 {
            doc.push_str(&format!(
                "<td rowspan=\"2\"><a title=\"Player {i}\">Player {i}</a></td>\
                 <td rowspan=\"2\">6</td><td rowspan=\"2\">6</td><td rowspan=\"2\">6</td>"
            ));
        }
        if i % 4 == 0 {
            doc.push_str(&format!(
                "<td rowspan=\"4\"><a title=\"Player {i}\">Player {i}</a></td>\
                 <td rowspan=\"4\">6</td><td rowspan=\"4\">6</td><td rowspan=\"4\">6</td>"
            ));
        }
        if i % 8 == 0 {
            doc.push_str(&format!(
                "<td rowspan=\"8\"><a title=\"Player {i}\">Player {i}</a></td>\
                 <td rowspan=\"8\">6</td><td rowspan=\"8\">6</td><td rowspan=\"8\">6</td>"
            ));
        }
        doc.push_str("</tr>\n");
    }
    doc.push_str("</table>");
    doc
}

fn bench_grid(c: &mut Criterion) {
    let table = synth_section();

    c.bench_function("grid_build", |b| {
        b.iter(|| {
            let g = grid::build_grid(black_box(&table));
            black_box(g.height())
        })
    });

    c.bench_function("grid_build_and_label", |b| {
        b.iter(|| {
            let g = grid::build_grid(black_box(&table));
            let groups = rounds::detect_groups(&g);
            black_box(groups.len())
        })
    });
}

criterion_group!(benches, bench_grid);
criterion_main!(benches);
