use clap::Parser;
use storysmith::Config;

/// `Storysmith` - turns a feature request into Gherkin user stories.
#[derive(Parser, Debug)]
#[command(name = "storysmith")]
#[command(version)]
#[command(
    about = "Interview a feature request and write Gherkin user stories.",
    long_about = None
)]
pub struct Cli {
    /// Feature request text (prompted for when omitted)
    pub request: Option<String>,

    /// Provider to use (openai, mistral, groq, claude, ollama)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Model to use (defaults per provider)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Temperature (0.0 - 2.0)
    #[arg(short, long)]
    pub temperature: Option<f64>,

    /// Directory for the generated markdown file
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Also print the finished document to stdout
    #[arg(long)]
    pub print: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Flags take precedence over the file and environment.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(provider) = &self.provider {
            config.provider.clone_from(provider);
        }
        if let Some(model) = &self.model {
            config.model = Some(model.clone());
        }
        if let Some(temperature) = self.temperature {
            config.temperature = temperature;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir.clone_from(output_dir);
        }
    }
}
