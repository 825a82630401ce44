//! Generate a synthetic survey mission for exercising the pipeline:
//! timestamped capture files, matching RGB photo names, and a GPS track.

use std::fs;
use std::io::Write;
use std::path::Path;

use habspec::config::CalibrationPoints;

const PIXELS: usize = 1280;
const SUMMED_ROWS: u32 = 800;
const DATE_PREFIX: &str = "2021-0717";

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Column-summed sensor counts for one capture.
fn synth_capture(axis: &[f64], chlorophyll: f64, water: bool, rng: &mut SimpleRng) -> Vec<f64> {
    axis.iter()
        .map(|&w| {
            // Daylight continuum through the sensor response, with the
            // chlorophyll fluorescence lines on top.
            let mut y = gaussian(w, 590.0, 90.0, 28.0) + 0.8;
            y += gaussian(w, 683.0, 6.0, chlorophyll);
            y += gaussian(w, 700.0, 9.0, chlorophyll * 0.6);
            if water {
                // The water column absorbs the near infrared.
                y *= 1.0 - 0.85 * logistic((w - 800.0) / 10.0);
            } else {
                // Vegetation red edge keeps the land passes bright in NIR.
                y += 12.0 * logistic((w - 710.0) / 15.0);
            }
            y * f64::from(SUMMED_ROWS) + 40.0 + rng.gauss(0.0, 3.0)
        })
        .collect()
}

fn clock(sod: u32) -> String {
    format!("{:02}{:02}{:02}", sod / 3600, (sod % 3600) / 60, sod % 60)
}

fn hms(sod: u32) -> String {
    format!("{:02}:{:02}:{:02}", sod / 3600, (sod % 3600) / 60, sod % 60)
}

fn write_capture(dir: &Path, sod: u32, usecs: u32, spectra: &[f64]) {
    let body = serde_json::json!({
        "hab_spec": {
            "spectra": spectra,
            "summed_rows": SUMMED_ROWS,
        }
    });
    let name = format!("{DATE_PREFIX}-{}-{usecs:06}-spec.json", clock(sod));
    let mut f = fs::File::create(dir.join(name)).expect("Failed to create capture file");
    f.write_all(body.to_string().as_bytes())
        .expect("Failed to write capture file");
}

fn main() {
    let out_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_mission".to_string());
    let out_dir = Path::new(&out_dir);

    let mut rng = SimpleRng::new(42);

    let axis = CalibrationPoints::default()
        .axis(PIXELS)
        .expect("Default calibration rejected");
    let axis = axis.values().to_vec();

    // Two flight lines, six captures each, two seconds apart.
    let line_starts: [u32; 2] = [60828, 60888]; // 16:53:48 and 16:54:48
    let mut captures = 0;
    for &start in &line_starts {
        let line_dir = out_dir.join(clock(start - 1));
        let spectra_dir = line_dir.join("hab_spectra");
        let rgb_dir = line_dir.join("hab_rgb");
        fs::create_dir_all(&spectra_dir).expect("Failed to create spectra directory");
        fs::create_dir_all(&rgb_dir).expect("Failed to create rgb directory");

        for i in 0..6u32 {
            let sod = start + 2 * i;
            // Two bloom passes, then a shoreline pass.
            let water = i % 3 != 2;
            let chlorophyll = if water { 2.0 + 3.0 * rng.next_f64() } else { 0.3 };
            let spectra = synth_capture(&axis, chlorophyll, water, &mut rng);
            let usecs = (rng.next_f64() * 1e6) as u32;
            write_capture(&spectra_dir, sod, usecs, &spectra);

            // Matching RGB frame a few hundred milliseconds later.
            let photo_usecs = (usecs + 290_000) % 1_000_000;
            let photo = format!("{DATE_PREFIX}-{}-{photo_usecs:06}-rgb.jpg", clock(sod));
            fs::File::create(rgb_dir.join(photo)).expect("Failed to create rgb stub");
            captures += 1;
        }
    }

    // GPS track bracketing the capture window, one fix every two seconds.
    let gps_path = out_dir.join("gps.txt");
    let mut gps = fs::File::create(&gps_path).expect("Failed to create gps file");
    writeln!(gps, "# synthetic aircraft track over the bloom transect")
        .expect("Failed to write gps file");
    writeln!(gps, "Week HMS Lat Lon Elev").expect("Failed to write gps file");
    let mut fixes = 0;
    let mut sod = 60808u32;
    while sod <= 60918 {
        let t = f64::from(sod - 60808);
        let lat = 27.58 + t * 0.00012;
        let lon = -82.70 + 0.0005 * (t / 7.0).sin();
        let elev = 455.0 + 6.0 * (t / 11.0).sin();
        writeln!(gps, "2167 {} {lat:.6} {lon:.6} {elev:.1}", hms(sod))
            .expect("Failed to write gps file");
        sod += 2;
        fixes += 1;
    }

    println!(
        "Wrote {captures} captures ({PIXELS} pixels each) and {fixes} GPS fixes under {}",
        out_dir.display()
    );
    println!(
        "Process with: habspec {} --gps {}",
        out_dir.display(),
        gps_path.display()
    );
}
