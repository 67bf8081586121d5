use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use feature_colors::{palettes, ColorMode, ColorState, Palette};
use serde_json::json;

type Err = Box<dyn Error>;

fn table_of_colors(fh: &mut impl Write, colors: &[String],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {c}\"></td>")?;
    }
    writeln!(fh, "<td style=\"padding-left: 7px\">{comment}</td>\
                  </tr></table><br/>")?;
    Ok(())
}

fn sweep(fh: &mut impl Write, palette: &Palette, n: usize,
         width: u32, comment: &str) -> Result<(), Err> {
    let dt = 1. / (n - 1) as f64;
    let colors: Vec<_> = (0..n)
        .map(|i| palette.resolve(i as f64 * dt, 1., false))
        .collect();
    table_of_colors(fh, &colors, width, comment)
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("swatches.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>feature-colors: swatches {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;

    writeln!(fh, "<h3>Built-in palettes</h3>")?;
    for p in palettes::ALL.iter() {
        sweep(&mut fh, &p.discrete(), p.len(), 40,
              &format!("{} ({} colors)", p.name, p.len()))?;
        sweep(&mut fh, &p.ramp(), 128, 1,
              &format!("{} (interpolated)", p.name))?;
    }

    writeln!(fh, "<h3>Hash coloring</h3>")?;
    let kinds = ["park", "water", "building", "road", "rail", "wood"];
    let colors: Vec<_> = kinds.iter()
        .map(|k| feature_colors::color_hash(&json!(k)))
        .collect();
    table_of_colors(&mut fh, &colors, 40, &kinds.join(", "))?;

    writeln!(fh, "<h3>Range strategy, heights 0..250</h3>")?;
    let state = ColorState::new()
        .filters(Some(0.), Some(250.))
        .palette(palettes::VIRIDIS.ramp());
    if let Some(color) = ColorMode::Range.strategy().color {
        let heights = [0., 25., 50., 100., 150., 200., 250.];
        let colors: Vec<_> = heights.iter()
            .map(|h| color(&json!(format!("{h} m")), &state))
            .collect();
        table_of_colors(&mut fh, &colors, 40, "low to high")?;
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
