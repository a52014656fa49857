use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;
use crate::scope::error::ScopeError;
use crate::scope::histogram::HistogramScene;
use crate::scope::waveform::WaveformScene;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub trace: RGBColor,
    pub marker: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(10, 10, 10),
            trace: GREEN,
            marker: YELLOW,
        }
    }
}
pub fn render_waveform_png(
    scene: &WaveformScene,
    style: PlotStyle,
) -> Result<Vec<u8>, ScopeError> {
    if scene.curves.is_empty() {
        return Err(ScopeError::Plot("waveform scene has no curves".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                "Signal Waveform",
                ("sans-serif", 20).into_font().color(&WHITE),
            )
            .set_label_area_size(LabelAreaPosition::Left, 45)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(
                0f64..scene.x_max.max(1.0),
                scene.limits.low..scene.limits.high,
            )?;
        chart
            .configure_mesh()
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        for curve in &scene.curves {
            let color = style.trace.mix(curve.opacity);
            let series = curve.samples.iter().enumerate().map(|(i, v)| (i as f64, *v));
            chart.draw_series(LineSeries::new(series, &color))?;
        }
        // Baseline marker: vertical line spanning the current y limits.
        let marker_x = scene.baseline_marker_x;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(marker_x, scene.limits.low), (marker_x, scene.limits.high)],
            style.marker.mix(0.8),
        )))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
pub fn render_histogram_png(
    scene: &HistogramScene,
    style: PlotStyle,
) -> Result<Vec<u8>, ScopeError> {
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        // An empty scene still renders: bare axes, nothing in them.
        let (x_low, x_high) = if scene.range.1 > scene.range.0 {
            scene.range
        } else {
            (0.0, 1.0)
        };
        let y_high = (scene.max_count as f64).max(1.0);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                "Peak Histogram",
                ("sans-serif", 20).into_font().color(&WHITE),
            )
            .set_label_area_size(LabelAreaPosition::Left, 45)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_low..x_high, 0f64..y_high)?;
        chart
            .configure_mesh()
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        if !scene.is_empty() {
            let bin_width = (x_high - x_low) / scene.bins.len() as f64;
            chart.draw_series(scene.bins.iter().enumerate().filter_map(|(i, &count)| {
                if count == 0 {
                    return None;
                }
                let x0 = x_low + i as f64 * bin_width;
                let x1 = x0 + bin_width;
                Some(Rectangle::new(
                    [(x0, 0.0), (x1, count as f64)],
                    style.trace.mix(0.8).filled(),
                ))
            }))?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ScopeError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| ScopeError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::histogram::bin_amplitudes;
    use crate::scope::waveform::WaveformRenderer;
    use crate::scope::event::Event;
    #[test]
    fn waveform_scene_renders_to_png() {
        let mut renderer = WaveformRenderer::new(2);
        let scene = renderer
            .render(&Event {
                timestamp: 0,
                channel: 0,
                samples: vec![100, 150, 900, 120],
            })
            .unwrap();
        let png = render_waveform_png(&scene, PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn histogram_renders_even_when_empty() {
        let scene = bin_amplitudes(&[]);
        let png = render_histogram_png(&scene, PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
        let populated = bin_amplitudes(&[1.0, 2.0, 2.0, 3.0]);
        let png = render_histogram_png(&populated, PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }
}
