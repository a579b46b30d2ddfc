//! 业务错误码定义
//!
//! 每个拒绝原因对应一个稳定的数字错误码，HTTP 层据此做确定性的状态码映射。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 1xxx 通用
    InternalServerError = 1000,
    BadRequest = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimited = 1005,
    ValidationError = 1006,

    // 2xxx 用户与认证
    UserNotFound = 2001,
    UserAlreadyExists = 2002,
    InvalidCredentials = 2003,
    UserSuspended = 2004,
    TokenInvalid = 2005,

    // 3xxx 课程与班级
    CourseNotFound = 3001,
    CourseCodeExists = 3002,
    CourseInUse = 3003,
    ClassNotFound = 3101,
    ClassHasDependents = 3102,
    ClassPermissionDenied = 3103,

    // 32xx 选课
    NotEnrolled = 3201,
    AlreadyEnrolled = 3202,
    CapacityExceeded = 3203,

    // 4xxx 作业
    AssignmentNotFound = 4001,
    DueDateNotInFuture = 4002,
    MaxScoreOutOfRange = 4003,
    AssignmentHasSubmissions = 4004,

    // 5xxx 提交
    SubmissionNotFound = 5001,
    AlreadySubmitted = 5002,
    SubmissionClosed = 5003,
    ResubmissionNotAllowed = 5004,
    CannotResubmitGradedWork = 5005,
    CannotDeleteGradedSubmission = 5006,

    // 6xxx 评分
    GradeNotFound = 6001,
    AlreadyGraded = 6002,
    ScoreOutOfRange = 6003,
    GradeAlreadyPublished = 6004,

    // 7xxx 文件
    FileNotFound = 7001,
    FileTooLarge = 7002,
    FileTypeNotAllowed = 7003,
    FileUploadFailed = 7004,
}
