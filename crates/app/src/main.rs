//! Demo entry point: walk the auth flow end to end against the in-memory
//! identity provider.

use std::sync::Arc;

use planboard_app::{AppConfig, AppContext, FlowHandle};
use planboard_auth::{EmailAddress, InMemoryIdentityProvider};
use planboard_flows::SignInFlow;
use planboard_store::InMemorySessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    planboard_observability::init();

    let provider = Arc::new(InMemoryIdentityProvider::new());
    let eve = EmailAddress::parse("eve.holt@reqres.in")
        .map_err(|err| anyhow::anyhow!("seed account email: {err}"))?;
    provider.register(&eve, "cityslicka", Some("Eve Holt"));

    let store = Arc::new(InMemorySessionStore::new());
    let context = AppContext::start(AppConfig::from_env(), provider, store);

    println!("guard(/dashboard) = {:?}", context.decide_route("/dashboard"));

    let mut flow = SignInFlow::new();
    let handle = FlowHandle::new();
    match context
        .submit_sign_in(&mut flow, &handle, "eve.holt@reqres.in", "cityslicka", Some("/reports"))
        .await
    {
        Some(target) => println!("signed in, navigating to {} (replace={})", target.path, target.replace),
        None => println!("sign-in failed: {:?}", flow.error()),
    }

    println!("guard(/dashboard) = {:?}", context.decide_route("/dashboard"));

    println!("\nProjects:");
    for project in planboard_app::dashboard::sample_projects() {
        println!(
            "  {:<20} {:>3}%  {} (due {})",
            project.title, project.progress, project.status, project.deadline
        );
    }
    println!("Tasks:");
    for task in planboard_app::dashboard::sample_tasks() {
        println!("  {:<22} [{}] -> {}", task.task, task.priority, task.assigned_to);
    }

    context.sign_out().await?;
    println!("\nsigned out, guard(/dashboard) = {:?}", context.decide_route("/dashboard"));

    context.shutdown();
    Ok(())
}
