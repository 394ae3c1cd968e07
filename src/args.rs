use brochure_scrape::ScraperConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "brochure-scrape")]
#[command(about = "Collects brochure listings from prospektmaschine.de into a JSON file")]
#[command(version)]
pub struct Args {
    /// JSON file the brochures are written to
    #[arg(default_value = "brochures.json")]
    pub output: PathBuf,
}

impl Args {
    /// Default configuration with the chosen output file
    pub fn into_config(self) -> ScraperConfig {
        ScraperConfig::default().with_output_file(self.output)
    }
}
