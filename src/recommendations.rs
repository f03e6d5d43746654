use crate::auth::User;
use crate::models::Friendship;

/// Friend-of-friend suggestions for `requester`, in the order `users` lists them.
///
/// A candidate qualifies when it is not the requester, has no friendship
/// record from the requester to it, and is reached by some
/// requester -> X -> candidate pair of records. Status is ignored, so pending
/// requests count as edges. Each candidate is returned at most once however
/// many paths lead to it.
pub fn friends_of_friends<'a>(
    requester: &User,
    users: &'a [User],
    friendships: &[Friendship],
) -> Vec<&'a User> {
    users
        .iter()
        .filter(|candidate| candidate.id != requester.id)
        .filter(|candidate| {
            !friendships
                .iter()
                .any(|f| f.user_id == requester.id && f.friend_id == candidate.id)
        })
        .filter(|candidate| {
            friendships
                .iter()
                .filter(|first| first.user_id == requester.id)
                .any(|first| {
                    friendships.iter().any(|second| {
                        second.user_id == first.friend_id && second.friend_id == candidate.id
                    })
                })
        })
        .collect()
}
