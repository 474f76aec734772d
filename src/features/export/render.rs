use crate::features::chart::Chart;
use crate::shared::error::ExportError;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::drawing::IntoDrawingArea;
use plotters::element::PathElement;
use plotters::series::LineSeries;
use plotters::style::{Color, RGBColor, BLACK, WHITE};
use plotters_backend::DrawingBackend;

/// Draws `chart` onto any plotters backend and presents it.
pub(crate) fn draw_chart<DB>(chart: &Chart, backend: DB) -> Result<(), ExportError>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;

    let (x_range, y_range) = chart.bounds();
    let mut plot = ChartBuilder::on(&root)
        .caption(chart.title.as_str(), ("sans-serif", 18))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range, y_range)
        .map_err(drawing_error)?;

    let mut mesh = plot.configure_mesh();
    mesh.x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str());
    if !chart.grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(drawing_error)?;

    for series in &chart.series {
        let color = RGBColor(series.color.r, series.color.g, series.color.b);
        plot.draw_series(LineSeries::new(
            series.points.iter().copied(),
            color.stroke_width(1),
        ))
        .map_err(drawing_error)?
        .label(series.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if !chart.series.is_empty() {
        plot.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(drawing_error)?;
    }

    root.present().map_err(drawing_error)?;
    Ok(())
}

fn drawing_error<E: std::error::Error>(err: E) -> ExportError {
    ExportError::Drawing(err.to_string())
}
