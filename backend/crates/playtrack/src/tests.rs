//! Lifecycle tests for the playtrack crate
//! Use cases wired to the in-memory store, the way a caller would.

#[cfg(test)]
mod lifecycle_tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, Utc};
    use kernel::error::{app_error::AppError, kind::ErrorKind};
    use kernel::id::{GameId, PlayedGameId, PlayerId};

    use crate::application::*;
    use crate::domain::entity::{
        game::{Game, NewGame},
        played_game::{PlayedGame, PlayedGameUpdate},
        player::{NewPlayer, Player, PlayerUpdate},
    };
    use crate::domain::value_object::{PlayTime, PlayedGameStatus};
    use crate::error::PlaytrackError;
    use crate::infra::memory::InMemoryPlaytrackRepository;

    type Store = InMemoryPlaytrackRepository;

    struct Fixture {
        store: Arc<Store>,
        config: Arc<PlaytrackConfig>,
        base: DateTime<Utc>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                store: Arc::new(Store::new()),
                config: Arc::new(PlaytrackConfig::with_pepper("test-pepper")),
                base: Utc::now() - Duration::days(1),
            }
        }

        async fn player(&self, name: &str) -> Player {
            RegisterPlayerUseCase::new(self.store.clone(), self.config.clone())
                .execute(NewPlayer {
                    username: name.to_string(),
                    password: "hunter2-hunter2".to_string(),
                    ..Default::default()
                })
                .await
                .unwrap()
        }

        async fn game(&self, title: &str, hours_to_beat: i32) -> Game {
            CreateGameUseCase::new(self.store.clone())
                .execute(NewGame {
                    title: title.to_string(),
                    hours_to_beat,
                    url: Some("https://howlongtobeat.com/game/1".to_string()),
                })
                .await
                .unwrap()
        }

        fn starter(&self) -> StartPlayedGameUseCase<Store, Store, Store> {
            StartPlayedGameUseCase::new(self.store.clone(), self.store.clone(), self.store.clone())
        }

        fn updater(&self) -> UpdatePlayedGameUseCase<Store> {
            UpdatePlayedGameUseCase::new(self.store.clone())
        }

        fn queries(&self) -> PlaytrackQueries<Store, Store, Store> {
            PlaytrackQueries::new(self.store.clone(), self.store.clone(), self.store.clone())
        }

        async fn start(&self, player: &Player, game: &Game) -> PlayedGame {
            self.starter()
                .execute(&Actor::player(player.id), player.id, game.id)
                .await
                .unwrap()
        }

        /// Backdate the start and move to a terminal status in one update
        async fn finish(
            &self,
            player: &Player,
            played: &PlayedGame,
            status: PlayedGameStatus,
            started_hours_in: i64,
        ) -> PlayedGame {
            self.updater()
                .execute(
                    &Actor::player(player.id),
                    player.id,
                    played.id,
                    PlayedGameUpdate {
                        started_at: Some(self.base + Duration::hours(started_hours_in)),
                        status: Some(status),
                        ..Default::default()
                    },
                )
                .await
                .unwrap()
        }

        async fn stored(&self, player_id: PlayerId, id: PlayedGameId) -> PlayedGame {
            self.queries().get_played_game(player_id, id).await.unwrap()
        }
    }

    #[tokio::test]
    async fn test_start_copies_catalog_points() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Hollow Knight", 9).await;
        assert_eq!(game.points, 3);

        let played = fx.start(&alice, &game).await;
        assert_eq!(played.status, PlayedGameStatus::Added);
        assert_eq!(played.points, 3);
        assert!(played.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_drop_without_prior_drop_is_minus_one() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Hollow Knight", 9).await;

        let played = fx.start(&alice, &game).await;
        let dropped = fx.finish(&alice, &played, PlayedGameStatus::Dropped, 0).await;

        assert_eq!(dropped.points, -1);
        assert!(dropped.completed_at.is_some());

        let stored = fx.stored(alice.id, played.id).await;
        assert_eq!(stored, dropped);
    }

    #[tokio::test]
    async fn test_consecutive_drops_stack() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Dark Souls", 40).await;

        let mut points = Vec::new();
        for hour in [0, 1, 2] {
            let played = fx.start(&alice, &game).await;
            let dropped = fx.finish(&alice, &played, PlayedGameStatus::Dropped, hour).await;
            points.push(dropped.points);
        }

        assert_eq!(points, [-1, -2, -3]);
    }

    #[tokio::test]
    async fn test_completion_resets_drop_stack() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Celeste", 8).await;

        let first = fx.start(&alice, &game).await;
        fx.finish(&alice, &first, PlayedGameStatus::Dropped, 0).await;

        let second = fx.start(&alice, &game).await;
        let completed = fx.finish(&alice, &second, PlayedGameStatus::Completed, 1).await;
        // completion keeps the catalog points
        assert_eq!(completed.points, game.points);

        let third = fx.start(&alice, &game).await;
        let dropped = fx.finish(&alice, &third, PlayedGameStatus::Dropped, 2).await;
        assert_eq!(dropped.points, -1);
    }

    #[tokio::test]
    async fn test_reroll_is_zero_and_skipped_by_drop_stack() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Celeste", 8).await;

        let first = fx.start(&alice, &game).await;
        fx.finish(&alice, &first, PlayedGameStatus::Dropped, 0).await;

        let second = fx.start(&alice, &game).await;
        let rerolled = fx.finish(&alice, &second, PlayedGameStatus::Rerolled, 1).await;
        assert_eq!(rerolled.points, 0);
        assert!(rerolled.completed_at.is_some());

        let third = fx.start(&alice, &game).await;
        let dropped = fx.finish(&alice, &third, PlayedGameStatus::Dropped, 2).await;
        assert_eq!(dropped.points, -2);
    }

    #[tokio::test]
    async fn test_explicit_completion_time_is_kept() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Celeste", 8).await;
        let played = fx.start(&alice, &game).await;

        let started = fx.base;
        let completed = fx.base + Duration::hours(5);
        let updated = fx
            .updater()
            .execute(
                &Actor::player(alice.id),
                alice.id,
                played.id,
                PlayedGameUpdate {
                    started_at: Some(started),
                    completed_at: Some(completed),
                    status: Some(PlayedGameStatus::Completed),
                    play_time: Some("5h".parse::<PlayTime>().unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.completed_at, Some(completed));
        assert_eq!(updated.play_time, Some(PlayTime::from_secs(5 * 3600)));
    }

    #[tokio::test]
    async fn test_second_start_blocked_until_terminal() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Celeste", 8).await;

        let first = fx.start(&alice, &game).await;
        fx.updater()
            .execute(
                &Actor::player(alice.id),
                alice.id,
                first.id,
                PlayedGameUpdate {
                    status: Some(PlayedGameStatus::InProgress),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = fx
            .starter()
            .execute(&Actor::player(alice.id), alice.id, game.id)
            .await
            .unwrap_err();
        assert!(matches!(err, PlaytrackError::ActiveGameExists(id) if id == first.id));

        let app_err = AppError::from(err);
        assert_eq!(app_err.kind(), ErrorKind::Conflict);
        assert!(app_err.action().is_some());

        fx.finish(&alice, &first, PlayedGameStatus::Completed, 0).await;
        let second = fx.start(&alice, &game).await;
        assert_ne!(second.id, first.id);

        // Other players are never blocked by alice's game
        let bobby = fx.player("bobby").await;
        fx.start(&bobby, &game).await;
    }

    #[tokio::test]
    async fn test_illegal_transition_persists_nothing() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Celeste", 8).await;
        let played = fx.start(&alice, &game).await;
        let completed = fx.finish(&alice, &played, PlayedGameStatus::Completed, 0).await;

        let err = fx
            .updater()
            .execute(
                &Actor::player(alice.id),
                alice.id,
                played.id,
                PlayedGameUpdate {
                    comment: Some("changed my mind".to_string()),
                    status: Some(PlayedGameStatus::Dropped),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PlaytrackError::Transition(_)));

        assert_eq!(fx.stored(alice.id, played.id).await, completed);
    }

    #[tokio::test]
    async fn test_invalid_field_persists_nothing() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Celeste", 8).await;
        let played = fx.start(&alice, &game).await;

        let cases = [
            PlayedGameUpdate {
                points: Some(99),
                rating: Some(101),
                ..Default::default()
            },
            PlayedGameUpdate {
                comment: Some("x".repeat(257)),
                ..Default::default()
            },
            PlayedGameUpdate {
                completed_at: Some(Utc::now()),
                ..Default::default()
            },
        ];

        for update in cases {
            let err = fx
                .updater()
                .execute(&Actor::player(alice.id), alice.id, played.id, update)
                .await
                .unwrap_err();
            assert!(err.is_validation(), "unexpected error: {err}");
        }

        assert_eq!(fx.stored(alice.id, played.id).await, played);
    }

    #[tokio::test]
    async fn test_empty_update_is_noop() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let game = fx.game("Celeste", 8).await;
        let played = fx.start(&alice, &game).await;

        let same = fx
            .updater()
            .execute(
                &Actor::player(alice.id),
                alice.id,
                played.id,
                PlayedGameUpdate::default(),
            )
            .await
            .unwrap();
        assert_eq!(same, played);
    }

    #[tokio::test]
    async fn test_acting_for_another_player() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let bobby = fx.player("bobby").await;
        let game = fx.game("Celeste", 8).await;

        let err = fx
            .starter()
            .execute(&Actor::player(bobby.id), alice.id, game.id)
            .await
            .unwrap_err();
        assert!(matches!(err, PlaytrackError::Forbidden));

        let played = fx
            .starter()
            .execute(&Actor::admin(bobby.id), alice.id, game.id)
            .await
            .unwrap();
        assert_eq!(played.player_id, alice.id);

        // A played game is only visible under its owner
        let err = fx
            .updater()
            .execute(
                &Actor::player(bobby.id),
                bobby.id,
                played.id,
                PlayedGameUpdate::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PlaytrackError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_references() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;

        let err = fx
            .starter()
            .execute(&Actor::player(alice.id), alice.id, GameId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, PlaytrackError::NotFound(_)));

        let ghost = PlayerId::new();
        let game = fx.game("Celeste", 8).await;
        let err = fx
            .starter()
            .execute(&Actor::admin(alice.id), ghost, game.id)
            .await
            .unwrap_err();
        assert!(matches!(err, PlaytrackError::NotFound(_)));
        assert_eq!(AppError::from(err).kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let auth = AuthenticatePlayerUseCase::new(fx.store.clone(), fx.config.clone());

        let found = auth
            .execute(AuthenticateInput {
                username: "alice".to_string(),
                password: "hunter2-hunter2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(found.id, alice.id);

        for (username, password) in [("alice", "wrong-password"), ("nobody", "hunter2-hunter2")] {
            let err = auth
                .execute(AuthenticateInput {
                    username: username.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, PlaytrackError::Unauthorized));
        }
    }

    #[tokio::test]
    async fn test_username_uniqueness() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        fx.player("bobby").await;

        let err = RegisterPlayerUseCase::new(fx.store.clone(), fx.config.clone())
            .execute(NewPlayer {
                username: "alice".to_string(),
                password: "another-password".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PlaytrackError::UsernameTaken));

        let update = UpdatePlayerUseCase::new(fx.store.clone(), fx.config.clone());
        let err = update
            .execute(
                &Actor::player(alice.id),
                alice.id,
                PlayerUpdate {
                    username: Some("bobby".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PlaytrackError::UsernameTaken));

        let renamed = update
            .execute(
                &Actor::player(alice.id),
                alice.id,
                PlayerUpdate {
                    username: Some("alice2".to_string()),
                    password: Some("new-password-1".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.username.as_str(), "alice2");

        let auth = AuthenticatePlayerUseCase::new(fx.store.clone(), fx.config.clone());
        auth.execute(AuthenticateInput {
            username: "alice2".to_string(),
            password: "new-password-1".to_string(),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_leaderboard() {
        let fx = Fixture::new();
        let alice = fx.player("alice").await;
        let bobby = fx.player("bobby").await;
        fx.player("carol").await;
        let long = fx.game("Persona 5", 100).await;
        let short = fx.game("Portal", 2).await;

        let played = fx.start(&alice, &long).await;
        fx.finish(&alice, &played, PlayedGameStatus::Completed, 0).await;
        let played = fx.start(&alice, &short).await;
        fx.finish(&alice, &played, PlayedGameStatus::Dropped, 1).await;

        let played = fx.start(&bobby, &short).await;
        fx.finish(&bobby, &played, PlayedGameStatus::Completed, 0).await;

        let board = fx.queries().leaderboard().await.unwrap();
        let rows: Vec<_> = board
            .iter()
            .map(|e| (e.username.as_str(), e.points, e.total))
            .collect();
        assert_eq!(rows, [("alice", 25, 2), ("bobby", 1, 1), ("carol", 0, 0)]);
        assert_eq!(board[0].completed, 1);
        assert_eq!(board[0].dropped, 1);
    }

    #[tokio::test]
    async fn test_invalid_game_rejected() {
        let fx = Fixture::new();
        let create = CreateGameUseCase::new(fx.store.clone());

        for (title, hours) in [("ok", 5), ("Valid title", 0)] {
            let err = create
                .execute(NewGame {
                    title: title.to_string(),
                    hours_to_beat: hours,
                    url: None,
                })
                .await
                .unwrap_err();
            assert!(matches!(err, PlaytrackError::InvalidGame(_)));
        }

        assert!(fx.queries().list_games().await.unwrap().is_empty());
    }
}
