//! Re-derive BMI and daily goals for every stored profile
//! Usage: cargo run --bin recalculate_goals -- [uid]

use biosync::db::{self, Database};
use biosync::models::UserProfile;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let only_uid = std::env::args().nth(1);

    let db_path = db::database_path();
    println!("Database: {}", db_path.display());

    let database = Database::new(&db_path)?;

    database.with_conn_mut(|conn| {
        db::migrations::run_migrations(conn)?;

        let tx = conn.transaction()?;

        let uids: Vec<String> = match &only_uid {
            Some(uid) => vec![uid.clone()],
            None => {
                let total = UserProfile::count(&tx)?;
                UserProfile::list(&tx, total.max(1), 0)?
                    .into_iter()
                    .map(|p| p.uid)
                    .collect()
            }
        };

        println!("Recalculating {} profile(s)", uids.len());

        for uid in &uids {
            let before = match UserProfile::get_by_uid(&tx, uid)? {
                Some(p) => p,
                None => {
                    println!("No profile found for uid: {}", uid);
                    continue;
                }
            };

            let Some(after) = UserProfile::recalculate_goals(&tx, uid)? else {
                continue;
            };

            println!("\n{} ({})", after.full_name, uid);
            println!("  BMI:     {:.1} -> {:.1}", before.bmi, after.bmi);
            println!("  Water:   {} -> {} ml", before.daily_water_goal, after.daily_water_goal);
            println!("  Calorie: {} -> {} kcal", before.daily_calorie_goal, after.daily_calorie_goal);
        }

        tx.commit()?;
        Ok(())
    })?;

    Ok(())
}
