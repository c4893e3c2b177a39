use anyhow::Context;
use sqlx::{PgConnection, PgExecutor, PgPool};
use uuid::Uuid;

use crate::auth::repo_types::User;
use crate::teams::repo_types::{
    ActivityLog, ActivityType, SubscriptionUpdate, Team, TeamMember, TeamWithMembers,
};

const TEAM_COLUMNS: &str = "id, name, stripe_customer_id, stripe_subscription_id, \
     stripe_product_id, plan_name, subscription_status, created_at, updated_at";

pub async fn create_team(conn: &mut PgConnection, name: &str) -> anyhow::Result<Team> {
    let team = sqlx::query_as::<_, Team>(&format!(
        "INSERT INTO teams (name) VALUES ($1) RETURNING {TEAM_COLUMNS}"
    ))
    .bind(name)
    .fetch_one(conn)
    .await
    .context("insert team")?;
    Ok(team)
}

pub async fn add_member(
    conn: &mut PgConnection,
    user_id: Uuid,
    team_id: Uuid,
    role: &str,
) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO team_members (user_id, team_id, role) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(team_id)
        .bind(role)
        .execute(conn)
        .await
        .context("insert team member")?;
    Ok(())
}

pub async fn remove_memberships(conn: &mut PgConnection, user_id: Uuid) -> anyhow::Result<()> {
    sqlx::query("DELETE FROM team_members WHERE user_id = $1")
        .bind(user_id)
        .execute(conn)
        .await
        .context("delete team memberships")?;
    Ok(())
}

/// First team the user belongs to, if any.
pub async fn team_id_for_user<'e, E>(db: E, user_id: Uuid) -> anyhow::Result<Option<Uuid>>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as::<_, (Uuid,)>(
        r#"
        SELECT team_id
          FROM team_members
         WHERE user_id = $1
         ORDER BY joined_at ASC
         LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("team id for user")?;
    Ok(row.map(|(id,)| id))
}

/// Active user plus the id of their team.
pub async fn get_user_with_team(
    db: &PgPool,
    user_id: Uuid,
) -> anyhow::Result<Option<(User, Option<Uuid>)>> {
    let Some(user) = User::find_active(db, user_id).await? else {
        return Ok(None);
    };
    let team_id = team_id_for_user(db, user.id).await?;
    Ok(Some((user, team_id)))
}

pub async fn get_team_for_user(
    db: &PgPool,
    user_id: Uuid,
) -> anyhow::Result<Option<TeamWithMembers>> {
    let Some(team_id) = team_id_for_user(db, user_id).await? else {
        return Ok(None);
    };

    let team = sqlx::query_as::<_, Team>(&format!(
        "SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1"
    ))
    .bind(team_id)
    .fetch_one(db)
    .await
    .context("load team")?;

    let members = sqlx::query_as::<_, TeamMember>(
        r#"
        SELECT tm.id, tm.user_id, u.email, tm.role, tm.joined_at
          FROM team_members tm
          JOIN users u ON u.id = tm.user_id
         WHERE tm.team_id = $1 AND u.deleted_at IS NULL
         ORDER BY tm.joined_at ASC
        "#,
    )
    .bind(team_id)
    .fetch_all(db)
    .await
    .context("load team members")?;

    Ok(Some(TeamWithMembers { team, members }))
}

pub async fn get_team_by_stripe_customer_id(
    db: &PgPool,
    customer_id: &str,
) -> anyhow::Result<Option<Team>> {
    let team = sqlx::query_as::<_, Team>(&format!(
        "SELECT {TEAM_COLUMNS} FROM teams WHERE stripe_customer_id = $1 LIMIT 1"
    ))
    .bind(customer_id)
    .fetch_optional(db)
    .await
    .context("team by stripe customer")?;
    Ok(team)
}

pub async fn update_team_subscription(
    db: &PgPool,
    team_id: Uuid,
    update: &SubscriptionUpdate,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        UPDATE teams
           SET stripe_customer_id = COALESCE($2, stripe_customer_id),
               stripe_subscription_id = $3,
               stripe_product_id = $4,
               plan_name = $5,
               subscription_status = $6,
               updated_at = now()
         WHERE id = $1
        "#,
    )
    .bind(team_id)
    .bind(update.stripe_customer_id.as_deref())
    .bind(update.stripe_subscription_id.as_deref())
    .bind(update.stripe_product_id.as_deref())
    .bind(update.plan_name.as_deref())
    .bind(&update.subscription_status)
    .execute(db)
    .await
    .context("update team subscription")?;
    Ok(())
}

pub async fn log_activity<'e, E>(
    db: E,
    team_id: Option<Uuid>,
    user_id: Uuid,
    action: ActivityType,
    ip_address: Option<&str>,
) -> anyhow::Result<()>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO activity_logs (team_id, user_id, action, ip_address) VALUES ($1, $2, $3, $4)",
    )
    .bind(team_id)
    .bind(user_id)
    .bind(action.as_str())
    .bind(ip_address)
    .execute(db)
    .await
    .with_context(|| format!("insert activity {action}"))?;
    Ok(())
}

/// Most recent activity of one user, newest first.
pub async fn list_activity_logs(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> anyhow::Result<Vec<ActivityLog>> {
    let rows = sqlx::query_as::<_, ActivityLog>(
        r#"
        SELECT a.id, a.action, a.timestamp, a.ip_address, u.email AS user_email
          FROM activity_logs a
          LEFT JOIN users u ON u.id = a.user_id
         WHERE a.user_id = $1
         ORDER BY a.timestamp DESC
         LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(db)
    .await
    .context("list activity logs")?;
    Ok(rows)
}
