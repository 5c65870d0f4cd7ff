use anyhow::Result;
use dotenv::dotenv;
use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use restsys_client::alerts::AlertBoard;
use restsys_client::auth::{auth_guard, AuthStore, GuardDecision, KeyValueStorage, RouteTarget};
use restsys_client::config::{Config, Endpoint, PollerSettings};
use restsys_client::models::Credentials;
use restsys_client::services::{ApiClient, LoginService, NotificationService};
use restsys_client::tasks::{NotificationPoller, SharedRoute};

const TABLE_VIEW_PREFIX: &str = "/mesa/";

struct Console {
    poller: NotificationPoller,
    board: AlertBoard,
    route: SharedRoute,
    auth: AuthStore,
    login: LoginService,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    let api = ApiClient::new(config.api.clone());

    let storage = Arc::new(KeyValueStorage::open(&config.storage.path)?);
    let auth = AuthStore::new(storage);

    let mut console = Console::new(api, auth, config.poller.clone());
    let poller = console.poller.clone();
    let initial = env::var("APP_ROUTE").unwrap_or_else(|_| "/".to_string());
    if let Err(err) = console.navigate(&initial) {
        log::error!("Could not open {}: {:#}", initial, err);
    }

    println!("🔔 Watching {}", config.api.url(Endpoint::Notificaciones));
    println!("Commands: lista | ver N | atendido N | cerrar N | ruta /path | login EMAIL PASSWORD | logout");
    poller.start()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line? {
                Some(line) => console.dispatch(line.trim()).await,
                None => break,
            },
        }
    }

    poller.stop();
    Ok(())
}

impl Console {
    fn new(api: ApiClient, auth: AuthStore, settings: PollerSettings) -> Self {
        let route = SharedRoute::new("/");
        let board = AlertBoard::new();
        let poller = NotificationPoller::new(
            Arc::new(NotificationService::new(api.clone())),
            Arc::new(route.clone()),
            Arc::new(board.clone()),
            settings,
        );
        Self {
            poller,
            board,
            route,
            auth,
            login: LoginService::new(api),
        }
    }

    /// Runs one console line. A failing command is logged and the console keeps going.
    async fn dispatch(&mut self, line: &str) {
        if let Err(err) = self.handle(line).await {
            log::error!("Command '{}' failed: {:#}", line, err);
        }
    }

    async fn handle(&mut self, line: &str) -> Result<()> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [] => {}
            ["lista"] => self.list(),
            ["ruta", path] => self.navigate(path)?,
            ["login", email, password] => self.sign_in(email, password).await?,
            ["logout"] => {
                self.auth.clear_user_data()?;
                println!("👋 Signed out");
            }
            [action, position] => self.act(action, position),
            _ => println!("Unknown command: {}", line),
        }
        Ok(())
    }

    async fn sign_in(&mut self, email: &str, password: &str) -> Result<()> {
        match self.login.authenticate(&Credentials::new(email, password)).await? {
            Some(user) => {
                self.auth.set_user_data(Some(user))?;
                println!("✅ Signed in as {}", email);
            }
            None => println!("❌ Login rejected for {}", email),
        }
        Ok(())
    }

    fn list(&self) {
        let visible = self.board.visible();
        if visible.is_empty() {
            println!("(no alerts)");
        }
        for (index, alert) in visible.iter().enumerate() {
            let actions: Vec<&str> = alert.spec.actions.iter().map(|a| a.id).collect();
            println!(
                "{:>2}. [{:?}] {}: {} {:?}",
                index + 1,
                alert.spec.severity,
                alert.spec.summary,
                alert.spec.detail,
                actions
            );
        }
    }

    fn navigate(&mut self, path: &str) -> Result<()> {
        let target = if path.starts_with(TABLE_VIEW_PREFIX) {
            RouteTarget::public(path)
        } else {
            RouteTarget::new(path)
        };

        let landed = match auth_guard(&target, &mut self.auth)? {
            GuardDecision::Proceed => target.path,
            GuardDecision::Redirect(to) => to,
        };
        println!("📍 {}", landed);
        self.route.set(landed);
        Ok(())
    }

    fn act(&self, action_id: &str, position: &str) {
        let Some(alert) = position.parse().ok().and_then(|n| self.board.nth(n)) else {
            println!("No alert at {}", position);
            return;
        };
        let Some(action) = alert.spec.action(action_id) else {
            println!("Alert {} has no '{}' action", position, action_id);
            return;
        };

        let poller = self.poller.clone();
        let effect = action.effect;
        tokio::spawn(async move {
            poller.trigger(alert.handle, effect).await;
        });
    }
}
