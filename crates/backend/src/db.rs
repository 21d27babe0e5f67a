use diesel::prelude::*;
use diesel_async::{
    pooled_connection::{
        deadpool::{Object, Pool},
        AsyncDieselConnectionManager, ManagerConfig,
    },
    AsyncPgConnection, RunQueryDsl,
};
use jobspring_types::{Application, BlogPost, Job, JobSummary, Testimonial, User};
use uuid::Uuid;

use crate::repository::{JobFilter, Page};

pub type DbPool = Pool<AsyncPgConnection>;

async fn establish_tls_connection(config: String) -> diesel::ConnectionResult<AsyncPgConnection> {
    // Set up rustls TLS configuration
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

    let (client, connection) = tokio_postgres::connect(&config, tls)
        .await
        .map_err(|e| diesel::ConnectionError::BadConnection(e.to_string()))?;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Connection error: {}", e);
        }
    });

    AsyncPgConnection::try_from(client).await
}

/// Build the connection pool. Connections are opened lazily on first use.
pub fn establish_connection_pool(
    database_url: &str,
    use_tls: bool,
    max_size: usize,
) -> anyhow::Result<DbPool> {
    let config = if use_tls {
        let mut manager_config = ManagerConfig::default();
        manager_config.custom_setup =
            Box::new(|url| Box::pin(establish_tls_connection(url.to_string())));
        AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(
            database_url,
            manager_config,
        )
    } else {
        AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url)
    };

    let pool = Pool::builder(config).max_size(max_size).build()?;

    Ok(pool)
}

pub async fn get_conn(pool: &DbPool) -> anyhow::Result<Object<AsyncPgConnection>> {
    let conn = pool.get().await?;
    Ok(conn)
}

// User database operations
pub mod users {
    use super::*;
    use crate::models::{NewUser, UserChanges};

    pub async fn get_by_uid(
        conn: &mut AsyncPgConnection,
        user_uid: &str,
    ) -> anyhow::Result<Option<User>> {
        use crate::schema::users::dsl::*;

        let user = users
            .filter(uid.eq(user_uid))
            .first::<User>(conn)
            .await
            .optional()?;

        Ok(user)
    }

    pub async fn create(conn: &mut AsyncPgConnection, new_user: &NewUser) -> anyhow::Result<Option<User>> {
        use crate::schema::users::dsl::*;

        // A taken email yields no row rather than an error
        let user = diesel::insert_into(users)
            .values(new_user)
            .on_conflict(email)
            .do_nothing()
            .get_result::<User>(conn)
            .await
            .optional()?;

        Ok(user)
    }

    pub async fn upsert_by_email(
        conn: &mut AsyncPgConnection,
        new_user: &NewUser,
    ) -> anyhow::Result<User> {
        use crate::schema::users::dsl::*;

        let user = diesel::insert_into(users)
            .values(new_user)
            .on_conflict(email)
            .do_update()
            .set(&UserChanges::from(new_user))
            .get_result::<User>(conn)
            .await?;

        Ok(user)
    }
}

// Job database operations
pub mod jobs {
    use super::*;
    use crate::models::{JobChanges, NewJob};
    use crate::schema::jobs;
    use diesel::pg::Pg;

    /// Escape LIKE metacharacters so the term matches literally.
    pub fn contains_pattern(term: &str) -> String {
        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for c in term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    fn filtered(filter: &JobFilter) -> jobs::BoxedQuery<'static, Pg> {
        let mut query = jobs::table.into_boxed();

        if let Some(category) = &filter.category {
            query = query.filter(jobs::job_type.eq(category.clone()));
        }
        if let Some(term) = &filter.title {
            query = query.filter(jobs::job_title.ilike(contains_pattern(term)));
        }

        query
    }

    pub async fn list(
        conn: &mut AsyncPgConnection,
        filter: &JobFilter,
        page: Page,
    ) -> anyhow::Result<Vec<JobSummary>> {
        let items = filtered(filter)
            .select((
                jobs::id,
                jobs::job_title,
                jobs::job_type,
                jobs::salary_min,
                jobs::salary_max,
                jobs::publisher,
                jobs::publisher_name,
                jobs::published_at,
                jobs::deadline,
                jobs::applicants,
            ))
            .order_by((jobs::published_at.desc(), jobs::id.desc()))
            .offset(page.offset())
            .limit(page.size)
            .load::<JobSummary>(conn)
            .await?;

        Ok(items)
    }

    pub async fn count(conn: &mut AsyncPgConnection, filter: &JobFilter) -> anyhow::Result<i64> {
        let total = filtered(filter).count().get_result::<i64>(conn).await?;
        Ok(total)
    }

    pub async fn get_by_id(conn: &mut AsyncPgConnection, job_id: Uuid) -> anyhow::Result<Option<Job>> {
        use crate::schema::jobs::dsl::*;

        let job = jobs
            .filter(id.eq(job_id))
            .first::<Job>(conn)
            .await
            .optional()?;

        Ok(job)
    }

    pub async fn list_by_publisher(
        conn: &mut AsyncPgConnection,
        publisher_email: &str,
    ) -> anyhow::Result<Vec<Job>> {
        use crate::schema::jobs::dsl::*;

        let items = jobs
            .filter(publisher.eq(publisher_email))
            .order_by((published_at.desc(), id.desc()))
            .load::<Job>(conn)
            .await?;

        Ok(items)
    }

    pub async fn list_by_ids(conn: &mut AsyncPgConnection, job_ids: &[Uuid]) -> anyhow::Result<Vec<Job>> {
        use crate::schema::jobs::dsl::*;

        let items = jobs
            .filter(id.eq_any(job_ids.to_vec()))
            .order_by((published_at.desc(), id.desc()))
            .load::<Job>(conn)
            .await?;

        Ok(items)
    }

    pub async fn create(conn: &mut AsyncPgConnection, new_job: &NewJob) -> anyhow::Result<Job> {
        use crate::schema::jobs::dsl::*;

        let job = diesel::insert_into(jobs)
            .values(new_job)
            .get_result::<Job>(conn)
            .await?;

        Ok(job)
    }

    pub async fn update(
        conn: &mut AsyncPgConnection,
        job_id: Uuid,
        changes: &JobChanges,
    ) -> anyhow::Result<Option<Job>> {
        use crate::schema::jobs::dsl::*;

        if changes.is_empty() {
            return get_by_id(conn, job_id).await;
        }

        let updated = diesel::update(jobs.filter(id.eq(job_id)))
            .set(changes)
            .get_result::<Job>(conn)
            .await
            .optional()?;

        Ok(updated)
    }

    pub async fn increment_applicants(
        conn: &mut AsyncPgConnection,
        job_id: Uuid,
    ) -> anyhow::Result<Option<Job>> {
        use crate::schema::jobs::dsl::*;

        let updated = diesel::update(jobs.filter(id.eq(job_id)))
            .set(applicants.eq(applicants + 1))
            .get_result::<Job>(conn)
            .await
            .optional()?;

        Ok(updated)
    }
}

// Application database operations
pub mod applications {
    use super::*;
    use crate::models::NewApplication;

    /// Returns `None` when the user already applied to the job.
    pub async fn create(
        conn: &mut AsyncPgConnection,
        new_application: &NewApplication,
    ) -> anyhow::Result<Option<Application>> {
        use crate::schema::applications::dsl::*;

        let created = diesel::insert_into(applications)
            .values(new_application)
            .on_conflict((uid, job_id))
            .do_nothing()
            .get_result::<Application>(conn)
            .await
            .optional()?;

        Ok(created)
    }

    pub async fn list_by_user(
        conn: &mut AsyncPgConnection,
        user_uid: &str,
    ) -> anyhow::Result<Vec<Application>> {
        use crate::schema::applications::dsl::*;

        let items = applications
            .filter(uid.eq(user_uid))
            .order_by(applied_at.desc())
            .load::<Application>(conn)
            .await?;

        Ok(items)
    }

    pub async fn list_by_job(
        conn: &mut AsyncPgConnection,
        target_job: Uuid,
    ) -> anyhow::Result<Vec<Application>> {
        use crate::schema::applications::dsl::*;

        let items = applications
            .filter(job_id.eq(target_job))
            .order_by(applied_at.desc())
            .load::<Application>(conn)
            .await?;

        Ok(items)
    }
}

// Blog post and testimonial database operations
pub mod content {
    use super::*;

    pub async fn list_blog_posts(conn: &mut AsyncPgConnection) -> anyhow::Result<Vec<BlogPost>> {
        use crate::schema::blog_posts::dsl::*;

        let items = blog_posts
            .order_by(published_at.desc())
            .load::<BlogPost>(conn)
            .await?;

        Ok(items)
    }

    pub async fn get_blog_post(
        conn: &mut AsyncPgConnection,
        post_id: Uuid,
    ) -> anyhow::Result<Option<BlogPost>> {
        use crate::schema::blog_posts::dsl::*;

        let post = blog_posts
            .filter(id.eq(post_id))
            .first::<BlogPost>(conn)
            .await
            .optional()?;

        Ok(post)
    }

    pub async fn list_testimonials(
        conn: &mut AsyncPgConnection,
    ) -> anyhow::Result<Vec<Testimonial>> {
        use crate::schema::testimonials::dsl::*;

        let items = testimonials
            .order_by(created_at.desc())
            .load::<Testimonial>(conn)
            .await?;

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::jobs::contains_pattern;

    #[test]
    fn test_contains_pattern_wraps_term() {
        assert_eq!(contains_pattern("engineer"), "%engineer%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("100%_remote"), "%100\\%\\_remote%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
