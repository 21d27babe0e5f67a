use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use jobspring_backend::error::ErrorResponse;
use jobspring_types::{
    Application, ApplyJobRequest, BlogPost, CreateJobRequest, Job, JobCountResponse, JobListQuery,
    JobSummary, Testimonial, TokenRequest,
};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "jobspring-cli")]
#[command(about = "CLI for browsing and managing jobs via the Job Spring API")]
#[command(
    long_about = "A command-line interface for interacting with the Job Spring backend.\n\n\
    Browse and search jobs, read the blog, publish jobs and apply to them.\n\
    Gated commands need a session token: run `login` and export the printed\n\
    token as JOBSPRING_TOKEN."
)]
struct Cli {
    /// Backend server URL to connect to.
    #[arg(
        short,
        long,
        default_value = "http://localhost:5000",
        env = "JOBSPRING_API_URL"
    )]
    base_url: String,

    /// Session token sent as the `token` cookie on every request.
    #[arg(long, env = "JOBSPRING_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Obtain a session token for an identity
    ///
    /// Prints the token carried by the `Set-Cookie` header of `/jwt`.
    Login {
        #[arg(long)]
        uid: String,

        #[arg(long)]
        email: String,
    },
    /// Browse, search and publish jobs
    Jobs {
        #[command(subcommand)]
        action: JobAction,
    },
    /// Apply to a job as the logged-in user
    Apply {
        /// The UUID of the job to apply to.
        job_id: Uuid,

        #[arg(long, value_name = "TEXT")]
        name: String,

        #[arg(long, value_name = "EMAIL")]
        email: String,

        /// Link to the applicant's resume.
        #[arg(long, value_name = "URL")]
        resume: String,
    },
    /// List the applications submitted by a user
    Applications {
        #[arg(long)]
        uid: String,
    },
    /// Read blog posts
    Blog {
        #[command(subcommand)]
        action: BlogAction,
    },
    /// List testimonials
    Testimonials,
}

#[derive(Subcommand)]
enum JobAction {
    /// List jobs, newest first
    List {
        /// Only jobs of this type (e.g. "Remote", "Part-Time").
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text the title must contain.
        #[arg(short, long)]
        search: Option<String>,

        /// Zero-based page number.
        #[arg(short, long)]
        page: Option<i64>,

        #[arg(long)]
        size: Option<i64>,
    },
    /// Count jobs matching the same filters as `list`
    Count {
        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        search: Option<String>,
    },
    /// Search jobs by title
    Search { title: String },
    /// Show every field of one job
    Show { id: Uuid },
    /// Jobs published by the logged-in user
    Mine {
        #[arg(long)]
        uid: String,
    },
    /// Jobs the user has applied to
    Applied {
        #[arg(long)]
        uid: String,
    },
    /// Publish a new job under the logged-in user's email
    Publish {
        #[arg(long, value_name = "TEXT")]
        title: String,

        /// Job type, e.g. "On Site", "Remote", "Hybrid" or "Part-Time".
        #[arg(long = "type", value_name = "TEXT")]
        job_type: String,

        #[arg(long, value_name = "TEXT")]
        description: String,

        /// Must match the email in the session token.
        #[arg(long, value_name = "EMAIL")]
        publisher: String,

        #[arg(long)]
        salary_min: Option<i32>,

        #[arg(long)]
        salary_max: Option<i32>,

        #[arg(long, value_name = "URL")]
        thumb: Option<String>,
    },
    /// List applications received by one of your jobs
    Applications { id: Uuid },
}

#[derive(Subcommand)]
enum BlogAction {
    List,
    Show { id: Uuid },
}

struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url.trim_end_matches('/'), path));
        match &self.token {
            Some(token) => builder.header(header::COOKIE, format!("token={}", token)),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        parse(response).await
    }
}

/// Turn an API response into `T`, surfacing the server's error message.
async fn parse<T: DeserializeOwned>(response: Response) -> anyhow::Result<T> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => match body.details {
                Some(details) => format!("{}: {}", body.error, details),
                None => body.error,
            },
            Err(_) => status.to_string(),
        };
        bail!("{} ({})", message, status);
    }
    response
        .json()
        .await
        .context("Failed to decode response body")
}

fn print_summary(job: &JobSummary) {
    println!(
        "[{}] {} ({}) - {}",
        &job.id.to_string()[..8],
        job.job_title,
        job.job_type,
        job.publisher_name.as_deref().unwrap_or(&job.publisher)
    );
}

fn print_job(job: &Job) {
    println!("[{}] {} ({})", job.id, job.job_title, job.job_type);
    println!("    Publisher: {}", job.publisher);
    if let (Some(min), Some(max)) = (job.salary_min, job.salary_max) {
        println!("    Salary: {} - {}", min, max);
    }
    println!("    Applicants: {}", job.applicants);
    println!("    {}", job.job_description);
}

fn print_application(application: &Application) {
    println!(
        "[{}] job {} - {} <{}> {}",
        &application.id.to_string()[..8],
        application.job_id,
        application.applicant_name,
        application.applicant_email,
        application.resume_url
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let api = ApiClient {
        client: Client::new(),
        base_url: cli.base_url,
        token: cli.token,
    };

    match cli.command {
        Commands::Login { uid, email } => login(&api, uid, email).await?,
        Commands::Jobs { action } => handle_jobs(&api, action).await?,
        Commands::Apply {
            job_id,
            name,
            email,
            resume,
        } => {
            let req = ApplyJobRequest {
                job_id,
                uid: None,
                applicant_name: name,
                applicant_email: email,
                resume_url: resume,
            };
            let response = api
                .request(reqwest::Method::POST, "/apply-job")
                .json(&req)
                .send()
                .await?;
            let application: Application = parse(response).await?;
            println!("Applied: [{}]", &application.id.to_string()[..8]);
        }
        Commands::Applications { uid } => {
            let applications: Vec<Application> =
                api.get(&format!("/get-applications/{}", uid)).await?;
            if applications.is_empty() {
                println!("No applications found.");
            }
            applications.iter().for_each(print_application);
        }
        Commands::Blog { action } => match action {
            BlogAction::List => {
                let posts: Vec<BlogPost> = api.get("/get-blog-posts").await?;
                for post in posts {
                    println!(
                        "[{}] {} by {}",
                        &post.id.to_string()[..8],
                        post.title,
                        post.author
                    );
                }
            }
            BlogAction::Show { id } => {
                let post: Option<BlogPost> = api.get(&format!("/get-blog-post/{}", id)).await?;
                match post {
                    Some(post) => println!("{}\n\n{}", post.title, post.body),
                    None => println!("Blog post not found."),
                }
            }
        },
        Commands::Testimonials => {
            let testimonials: Vec<Testimonial> = api.get("/get-testimonials").await?;
            for t in testimonials {
                let rating = t.rating.map(|r| format!(" ({}/5)", r)).unwrap_or_default();
                println!("{}{}: \"{}\"", t.name, rating, t.quote);
            }
        }
    }

    Ok(())
}

/// Token value of a `Set-Cookie: token=...` header.
fn session_token(set_cookie: &str) -> Option<String> {
    let cookie = cookie::Cookie::parse(set_cookie).ok()?;
    if cookie.name() != "token" || cookie.value().is_empty() {
        return None;
    }
    Some(cookie.value().to_string())
}

async fn login(api: &ApiClient, uid: String, email: String) -> anyhow::Result<()> {
    let req = TokenRequest {
        uid,
        email,
        extra: Default::default(),
    };
    let response = api
        .request(reqwest::Method::POST, "/jwt")
        .json(&req)
        .send()
        .await?;

    let token = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(session_token);

    let _: serde_json::Value = parse(response).await?;
    let token = token.context("Server did not set a session cookie")?;

    println!("{}", token);
    Ok(())
}

async fn handle_jobs(api: &ApiClient, action: JobAction) -> anyhow::Result<()> {
    match action {
        JobAction::List {
            category,
            search,
            page,
            size,
        } => {
            let query = JobListQuery {
                category,
                search,
                page,
                size,
            };
            let response = api
                .request(reqwest::Method::GET, "/get-all-jobs")
                .query(&query)
                .send()
                .await?;
            let jobs: Vec<JobSummary> = parse(response).await?;
            if jobs.is_empty() {
                println!("No jobs found.");
            }
            jobs.iter().for_each(print_summary);
        }
        JobAction::Count { category, search } => {
            let query = JobListQuery {
                category,
                search,
                ..Default::default()
            };
            let response = api
                .request(reqwest::Method::GET, "/get-jobs-count")
                .query(&query)
                .send()
                .await?;
            let count: JobCountResponse = parse(response).await?;
            println!("{}", count.count);
        }
        JobAction::Search { title } => {
            let response = api
                .request(reqwest::Method::GET, "/search")
                .query(&[("title", title)])
                .send()
                .await?;
            let jobs: Vec<JobSummary> = parse(response).await?;
            jobs.iter().for_each(print_summary);
        }
        JobAction::Show { id } => {
            let job: Option<Job> = api.get(&format!("/job-details/{}", id)).await?;
            match job {
                Some(job) => print_job(&job),
                None => println!("Job not found."),
            }
        }
        JobAction::Mine { uid } => {
            let jobs: Vec<Job> = api.get(&format!("/my-jobs/{}", uid)).await?;
            jobs.iter().for_each(print_job);
        }
        JobAction::Applied { uid } => {
            let jobs: Vec<Job> = api.get(&format!("/get-applied-jobs/{}", uid)).await?;
            jobs.iter().for_each(print_job);
        }
        JobAction::Publish {
            title,
            job_type,
            description,
            publisher,
            salary_min,
            salary_max,
            thumb,
        } => {
            let req = CreateJobRequest {
                job_title: title,
                job_type,
                company_thumb: thumb,
                job_description: description,
                salary_min,
                salary_max,
                publisher,
                publisher_name: None,
                deadline: None,
            };
            let response = api
                .request(reqwest::Method::POST, "/add-job")
                .json(&req)
                .send()
                .await?;
            let job: Job = parse(response).await?;
            println!("Published job: [{}] {}", job.id, job.job_title);
        }
        JobAction::Applications { id } => {
            let applications: Vec<Application> =
                api.get(&format!("/job-applications/{}", id)).await?;
            if applications.is_empty() {
                println!("No applications found.");
            }
            applications.iter().for_each(print_application);
        }
    }

    Ok(())
}
