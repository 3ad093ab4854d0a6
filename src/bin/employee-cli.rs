use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command line client for the employee proxy", long_about = None)]
struct Cli {
    /// Base URL of the employee API.
    #[arg(short, long, default_value = "http://localhost:8111/api/v1/employee")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every employee
    List,
    /// Show one employee
    Get { id: String },
    /// Find employees whose name contains the query
    Search { query: String },
    /// Print the highest salary
    HighestSalary,
    /// Print the names of the ten best paid employees
    TopEarners,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: u32,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        title: String,
    },
    /// Delete an employee by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base: Url = cli.url.parse()?;

    let request = match cli.command {
        Commands::List => client.get(endpoint(&base, &[])?),
        Commands::Get { id } => client.get(endpoint(&base, &[id.as_str()])?),
        Commands::Search { query } => client.get(endpoint(&base, &["search", query.as_str()])?),
        Commands::HighestSalary => client.get(endpoint(&base, &["highestSalary"])?),
        Commands::TopEarners => {
            client.get(endpoint(&base, &["topTenHighestEarningEmployeeNames"])?)
        }
        Commands::Create {
            name,
            salary,
            age,
            title,
        } => client.post(endpoint(&base, &[])?).json(&json!({
            "name": name,
            "salary": salary,
            "age": age,
            "title": title,
        })),
        Commands::Delete { id } => client.delete(endpoint(&base, &[id.as_str()])?),
    };

    print_response(request.send().await?).await
}

/// `base` extended by `segments`, each percent-encoded as one path segment.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, String> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| format!("base URL '{}' cannot have a path", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: employee API returned status {}", status);
        eprintln!("Response: {}", text);
        std::process::exit(1);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
